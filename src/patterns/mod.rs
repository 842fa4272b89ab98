//! The built-in pattern table.
//!
//! Patterns are registered in this order, and earlier patterns win any
//! overlapping text:
//!
//! 1. explicit `key:value` syntax (`lang:rust,go`, `label:bug`)
//! 2. star and contributor counts (`stars > 100`, `at least 5 contributors`,
//!    `100 stars`)
//! 3. issue kinds, activity levels and experience levels
//! 4. frameworks, libraries and languages
//! 5. weak hints (`easy`, `popular`, `small team`)
//! 6. typo-tolerant vocabulary matches (`pyhton`), when enabled

pub mod counts;
pub mod qualifiers;
pub mod syntax;
pub mod vocabulary;

use crate::config::{FuzzyOptions, ParserConfig};
use crate::error::PatternError;
use crate::pattern::{Pattern, PatternTable};
use crate::types::{FilterCategory, MatchValue};
use std::sync::{Arc, LazyLock};
use vocabulary::{terms_for, Term};

#[cfg(feature = "fuzzy")]
use crate::pattern::RawValue;
#[cfg(feature = "fuzzy")]
use crate::recognizers::FuzzyRecognizer;

/// One keyword pattern per known name, named `{category}:{canonical}`.
fn vocabulary(category: FilterCategory) -> Result<Vec<Pattern>, PatternError> {
  terms_for(category)
    .iter()
    .map(|term: &Term| -> Result<Pattern, PatternError> {
      let canonical = term.canonical;
      Ok(
        Pattern::versioned_keywords(
          format!("{category}:{canonical}"),
          category,
          term.aliases,
        )?
        .with_normalizer(move |_| Some(MatchValue::Text(canonical.to_string()))),
      )
    })
    .collect()
}

#[cfg(feature = "fuzzy")]
fn fuzzy(category: FilterCategory, options: &FuzzyOptions) -> Pattern {
  let recognizer = Arc::new(
    FuzzyRecognizer::new(vocabulary::fuzzy_entries(terms_for(category)))
      .with_threshold(options.threshold)
      .with_min_len(options.min_len),
  );
  let lookup = Arc::clone(&recognizer);

  Pattern::new(format!("fuzzy:{category}"), category, recognizer)
    .with_normalizer(move |raw| match raw {
      RawValue::Single(word) => lookup
        .best_match(&word)
        .map(|(canonical, _)| MatchValue::Text(canonical.to_string())),
      RawValue::Multiple(_) => None,
    })
    .with_weight(0.5)
}

#[cfg(feature = "fuzzy")]
fn fuzzy_patterns(options: &FuzzyOptions) -> Vec<Pattern> {
  if !options.enabled {
    return Vec::new();
  }
  [
    FilterCategory::Framework,
    FilterCategory::Library,
    FilterCategory::Language,
  ]
  .into_iter()
  .map(|category| fuzzy(category, options))
  .collect()
}

#[cfg(not(feature = "fuzzy"))]
fn fuzzy_patterns(_options: &FuzzyOptions) -> Vec<Pattern> {
  Vec::new()
}

/// Builds the built-in table for a configuration.
pub fn builtin(config: &ParserConfig) -> Result<PatternTable, PatternError> {
  PatternTable::builder()
    .patterns(syntax::patterns()?)
    .patterns(counts::patterns()?)
    .patterns(qualifiers::issues()?)
    .patterns(qualifiers::activity()?)
    .patterns(qualifiers::experience()?)
    .patterns(vocabulary(FilterCategory::Framework)?)
    .patterns(vocabulary(FilterCategory::Library)?)
    .patterns(vocabulary(FilterCategory::Language)?)
    .patterns(qualifiers::experience_hints()?)
    .patterns(counts::heuristics()?)
    .patterns(fuzzy_patterns(&config.fuzzy))
    .build()
}

// A failure here is a broken built-in pattern, a configuration error that
// surfaces on first use and is covered by `test_builtin_covers_every_category`.
static DEFAULT_TABLE: LazyLock<Arc<PatternTable>> = LazyLock::new(|| {
  Arc::new(builtin(&ParserConfig::default()).expect("built-in patterns are valid"))
});

/// The built-in table for the default configuration, built once and shared.
pub fn default_table() -> Arc<PatternTable> {
  Arc::clone(&DEFAULT_TABLE)
}
