//! Patterns and the ordered, immutable pattern table.

use crate::error::PatternError;
use crate::recognizers::{Recognized, Recognizer, RegexRecognizer};
use crate::types::{FilterCategory, MatchValue};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// The value of a match before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
  Single(String),
  Multiple(Vec<String>),
}

impl RawValue {
  /// The value used when a pattern has no normalizer.
  pub fn into_match_value(self) -> MatchValue {
    match self {
      RawValue::Single(value) => MatchValue::Text(value),
      RawValue::Multiple(values) => MatchValue::List(values),
    }
  }
}

/// Pulls the raw value (or values) out of a recognized span.
pub type ValueExtractor = Box<dyn Fn(&Recognized<'_>) -> Option<RawValue> + Send + Sync>;

/// Turns a raw value into a typed value. Returning `None` rejects the match.
pub type Normalizer = Box<dyn Fn(RawValue) -> Option<MatchValue> + Send + Sync>;

/// An extraction rule: a recognizer bound to a filter category.
///
/// # Examples
///
/// ```rust
/// use querus::prelude::*;
///
/// let pattern = Pattern::keywords("language:rust", FilterCategory::Language, &["rust", "rustlang"])
///   .unwrap()
///   .with_normalizer(|_| Some(MatchValue::Text("rust".to_string())));
///
/// assert_eq!(pattern.category(), FilterCategory::Language);
/// ```
pub struct Pattern {
  name: String,
  category: FilterCategory,
  recognizer: Box<dyn Recognizer>,
  value_extractor: Option<ValueExtractor>,
  normalizer: Option<Normalizer>,
  weight: f32,
}

impl Pattern {
  /// Creates a pattern with weight 1.0 and no extractor or normalizer.
  pub fn new(
    name: impl Into<String>,
    category: FilterCategory,
    recognizer: impl Recognizer + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      category,
      recognizer: Box::new(recognizer),
      value_extractor: None,
      normalizer: None,
      weight: 1.0,
    }
  }

  /// Creates a pattern from a regular expression, with word boundaries enforced.
  pub fn regex(
    name: impl Into<String>,
    category: FilterCategory,
    pattern: &str,
  ) -> Result<Self, PatternError> {
    let name = name.into();
    match RegexRecognizer::new(pattern) {
      Ok(recognizer) => Ok(Self::new(name, category, recognizer)),
      Err(source) => Err(PatternError::InvalidRegex { name, source }),
    }
  }

  /// Creates a pattern from a list of case-insensitive keywords.
  pub fn keywords(
    name: impl Into<String>,
    category: FilterCategory,
    keywords: &[&str],
  ) -> Result<Self, PatternError> {
    Self::keyword_pattern(name.into(), category, keywords, false)
  }

  /// Like [`Pattern::keywords`], but a version written directly after a
  /// keyword (`python3`, `java17`) is part of the match.
  pub fn versioned_keywords(
    name: impl Into<String>,
    category: FilterCategory,
    keywords: &[&str],
  ) -> Result<Self, PatternError> {
    Self::keyword_pattern(name.into(), category, keywords, true)
  }

  fn keyword_pattern(
    name: String,
    category: FilterCategory,
    keywords: &[&str],
    versioned: bool,
  ) -> Result<Self, PatternError> {
    match RegexRecognizer::keywords(keywords, versioned) {
      Ok(recognizer) => Ok(Self::new(name, category, recognizer)),
      Err(source) => Err(PatternError::InvalidRegex { name, source }),
    }
  }

  /// Sets the value extractor.
  pub fn with_value_extractor<F>(mut self, extractor: F) -> Self
  where
    F: Fn(&Recognized<'_>) -> Option<RawValue> + Send + Sync + 'static,
  {
    self.value_extractor = Some(Box::new(extractor));
    self
  }

  /// Sets the normalizer.
  pub fn with_normalizer<F>(mut self, normalizer: F) -> Self
  where
    F: Fn(RawValue) -> Option<MatchValue> + Send + Sync + 'static,
  {
    self.normalizer = Some(Box::new(normalizer));
    self
  }

  /// Sets the weight this pattern's matches contribute to the confidence.
  pub fn with_weight(mut self, weight: f32) -> Self {
    self.weight = weight;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn category(&self) -> FilterCategory {
    self.category
  }

  pub fn weight(&self) -> f32 {
    self.weight
  }

  pub fn recognizer(&self) -> &dyn Recognizer {
    &*self.recognizer
  }

  /// Computes the value of a recognized span: the value extractor (or the
  /// matched text) followed by the normalizer (or a plain text value).
  ///
  /// `None` means the pattern rejects this span.
  pub fn value_of(&self, recognized: &Recognized<'_>) -> Option<MatchValue> {
    let raw = match &self.value_extractor {
      Some(extract) => extract(recognized)?,
      None => RawValue::Single(recognized.text.to_string()),
    };
    match &self.normalizer {
      Some(normalize) => normalize(raw),
      None => Some(raw.into_match_value()),
    }
  }
}

impl fmt::Debug for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pattern")
      .field("name", &self.name)
      .field("category", &self.category)
      .field("weight", &self.weight)
      .field("value_extractor", &self.value_extractor.is_some())
      .field("normalizer", &self.normalizer.is_some())
      .finish()
  }
}

/// An ordered, immutable collection of patterns.
///
/// Order is priority: when two patterns match overlapping text, the one
/// registered first keeps its match. A table is validated when it is built
/// and never changes afterwards, so it can be shared freely between threads.
///
/// Create a `PatternTable` using the [`PatternTableBuilder`].
#[derive(Debug)]
pub struct PatternTable {
  patterns: Vec<Pattern>,
}

impl PatternTable {
  /// Creates a new `PatternTableBuilder`.
  pub fn builder() -> PatternTableBuilder {
    PatternTableBuilder::new()
  }

  /// The patterns in priority order.
  pub fn patterns(&self) -> &[Pattern] {
    &self.patterns
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
    self.patterns.iter()
  }

  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Looks up a pattern by name.
  pub fn get(&self, name: &str) -> Option<&Pattern> {
    self.patterns.iter().find(|pattern| pattern.name == name)
  }

  /// The categories at least one pattern produces, in [`FilterCategory::ALL`] order.
  pub fn covered_categories(&self) -> Vec<FilterCategory> {
    FilterCategory::ALL
      .into_iter()
      .filter(|category| self.patterns.iter().any(|p| p.category == *category))
      .collect()
  }

  /// Checks the table for configuration errors.
  ///
  /// A table is valid when it is non-empty, every name is unique, every
  /// weight lies in `(0, 1]` and no recognizer matches the empty string.
  pub fn validate(&self) -> Result<(), PatternError> {
    if self.patterns.is_empty() {
      return Err(PatternError::EmptyTable);
    }

    let mut names = HashSet::new();
    for pattern in &self.patterns {
      if !names.insert(pattern.name.as_str()) {
        return Err(PatternError::DuplicateName(pattern.name.clone()));
      }
      if !(pattern.weight > 0.0 && pattern.weight <= 1.0) {
        return Err(PatternError::InvalidWeight {
          name: pattern.name.clone(),
          weight: pattern.weight,
        });
      }
      if pattern.recognizer.find_at("", 0).is_some() {
        return Err(PatternError::EmptyMatch(pattern.name.clone()));
      }
    }
    Ok(())
  }
}

/// Yields the patterns in priority order, so a table can be extended by
/// feeding it into a new builder.
impl IntoIterator for PatternTable {
  type Item = Pattern;
  type IntoIter = std::vec::IntoIter<Pattern>;

  fn into_iter(self) -> Self::IntoIter {
    self.patterns.into_iter()
  }
}

impl<'a> IntoIterator for &'a PatternTable {
  type Item = &'a Pattern;
  type IntoIter = std::slice::Iter<'a, Pattern>;

  fn into_iter(self) -> Self::IntoIter {
    self.patterns.iter()
  }
}

/// A builder for creating `PatternTable` instances.
///
/// # Examples
///
/// ```rust
/// use querus::prelude::*;
///
/// let table = PatternTable::builder()
///   .pattern(Pattern::keywords("issue:bug", FilterCategory::Issue, &["bug", "bugs"])?)
///   .pattern(Pattern::keywords("language:rust", FilterCategory::Language, &["rust"])?)
///   .build()?;
///
/// assert_eq!(table.len(), 2);
/// # Ok::<(), querus::error::PatternError>(())
/// ```
#[derive(Debug, Default)]
pub struct PatternTableBuilder {
  patterns: Vec<Pattern>,
}

impl PatternTableBuilder {
  /// Creates a new, empty `PatternTableBuilder`.
  pub fn new() -> Self {
    Self {
      patterns: Vec::new(),
    }
  }

  /// Appends a pattern. It has lower priority than every pattern added before it.
  pub fn pattern(mut self, pattern: Pattern) -> Self {
    self.patterns.push(pattern);
    self
  }

  /// Appends several patterns, in order.
  pub fn patterns(mut self, patterns: impl IntoIterator<Item = Pattern>) -> Self {
    self.patterns.extend(patterns);
    self
  }

  /// Builds and validates the table.
  pub fn build(self) -> Result<PatternTable, PatternError> {
    let table = PatternTable {
      patterns: self.patterns,
    };
    table.validate()?;
    debug!(patterns = table.len(), "built pattern table");
    Ok(table)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_value_of_defaults_to_text() {
    let pattern = Pattern::keywords("language:rust", FilterCategory::Language, &["rust"]).unwrap();
    let recognized = pattern.recognizer().find_at("Rust", 0).unwrap();
    assert_eq!(
      pattern.value_of(&recognized),
      Some(MatchValue::Text("Rust".to_string()))
    );
  }

  #[test]
  fn test_value_of_runs_extractor_then_normalizer() {
    let pattern = Pattern::regex("tags", FilterCategory::Library, r"tags:(\S+)")
      .unwrap()
      .with_value_extractor(|m| {
        m.group(1)
          .map(|list| RawValue::Multiple(list.split(',').map(str::to_string).collect()))
      })
      .with_normalizer(|raw| match raw {
        RawValue::Multiple(values) => Some(MatchValue::List(
          values.into_iter().map(|v| v.to_uppercase()).collect(),
        )),
        RawValue::Single(_) => None,
      });
    let recognized = pattern.recognizer().find_at("tags:a,b", 0).unwrap();
    assert_eq!(
      pattern.value_of(&recognized),
      Some(MatchValue::List(vec!["A".to_string(), "B".to_string()]))
    );
  }

  #[test]
  fn test_invalid_regex_is_reported() {
    let err = Pattern::regex("broken", FilterCategory::Stars, r"stars(").unwrap_err();
    assert!(matches!(err, PatternError::InvalidRegex { ref name, .. } if name == "broken"));
  }

  #[test]
  fn test_empty_table_is_rejected() {
    assert!(matches!(
      PatternTable::builder().build(),
      Err(PatternError::EmptyTable)
    ));
  }

  #[test]
  fn test_duplicate_names_are_rejected() {
    let result = PatternTable::builder()
      .pattern(Pattern::keywords("dup", FilterCategory::Issue, &["bug"]).unwrap())
      .pattern(Pattern::keywords("dup", FilterCategory::Issue, &["docs"]).unwrap())
      .build();
    assert!(matches!(result, Err(PatternError::DuplicateName(name)) if name == "dup"));
  }

  #[test]
  fn test_empty_matching_recognizer_is_rejected() {
    let result = PatternTable::builder()
      .pattern(Pattern::regex("anything", FilterCategory::Issue, r"\w*").unwrap())
      .build();
    assert!(matches!(result, Err(PatternError::EmptyMatch(name)) if name == "anything"));
  }

  #[test]
  fn test_weight_out_of_range_is_rejected() {
    for weight in [0.0, -1.0, 1.5, f32::NAN] {
      let result = PatternTable::builder()
        .pattern(
          Pattern::keywords("bug", FilterCategory::Issue, &["bug"])
            .unwrap()
            .with_weight(weight),
        )
        .build();
      assert!(matches!(result, Err(PatternError::InvalidWeight { .. })));
    }
  }

  #[test]
  fn test_covered_categories() {
    let table = PatternTable::builder()
      .pattern(Pattern::keywords("rust", FilterCategory::Language, &["rust"]).unwrap())
      .pattern(Pattern::keywords("bug", FilterCategory::Issue, &["bug"]).unwrap())
      .build()
      .unwrap();
    assert_eq!(
      table.covered_categories(),
      vec![FilterCategory::Language, FilterCategory::Issue]
    );
    assert!(table.get("bug").is_some());
    assert!(table.get("docs").is_none());
  }
}
