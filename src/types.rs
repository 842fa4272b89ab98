//! Core data types for the Querus query parser.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of filter a match contributes to.
///
/// Language, framework and library are multi-valued: every occurrence in a
/// query accumulates into a set. The remaining categories are single-valued
/// and resolve to the last occurrence in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
  /// A programming language such as `rust` or `python`.
  Language,
  /// An application framework such as `react` or `django`.
  Framework,
  /// A library such as `tokio` or `numpy`.
  Library,
  /// The contributor experience level a project is suited for.
  Experience,
  /// A star-count constraint.
  Stars,
  /// A contributor-count constraint.
  Contributors,
  /// How actively the project is maintained.
  Activity,
  /// The kind of issue the user wants to work on.
  Issue,
}

impl FilterCategory {
  /// Every category, in declaration order.
  pub const ALL: [FilterCategory; 8] = [
    FilterCategory::Language,
    FilterCategory::Framework,
    FilterCategory::Library,
    FilterCategory::Experience,
    FilterCategory::Stars,
    FilterCategory::Contributors,
    FilterCategory::Activity,
    FilterCategory::Issue,
  ];

  /// Returns `true` if matches of this category accumulate into a set.
  pub fn is_multi_valued(self) -> bool {
    matches!(
      self,
      FilterCategory::Language | FilterCategory::Framework | FilterCategory::Library
    )
  }

  /// The profile skill category this filter category corresponds to, if any.
  ///
  /// Profile skills and query filters share one vocabulary so that a
  /// user's skills can be compared against the filters extracted from
  /// their searches.
  pub fn skill_category(self) -> Option<SkillCategory> {
    match self {
      FilterCategory::Language => Some(SkillCategory::ProgrammingLanguage),
      FilterCategory::Framework => Some(SkillCategory::Framework),
      FilterCategory::Library => Some(SkillCategory::Library),
      _ => None,
    }
  }

  /// The lowercase name used in serialized output.
  pub fn as_str(self) -> &'static str {
    match self {
      FilterCategory::Language => "language",
      FilterCategory::Framework => "framework",
      FilterCategory::Library => "library",
      FilterCategory::Experience => "experience",
      FilterCategory::Stars => "stars",
      FilterCategory::Contributors => "contributors",
      FilterCategory::Activity => "activity",
      FilterCategory::Issue => "issue",
    }
  }
}

impl fmt::Display for FilterCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Skill categories used by user profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
  ProgrammingLanguage,
  Framework,
  Library,
  Tool,
  Database,
  Platform,
  Other,
}

/// Lowercases a label and folds `-`, `_` and runs of whitespace into a single
/// space so that `good-first-issue`, `Good_First_Issue` and
/// `good first  issue` compare equal.
fn fold_label(s: &str) -> String {
  s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
    .filter(|part| !part.is_empty())
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join(" ")
}

/// Error returned when a label cannot be parsed into one of the value enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown label: {}", self.0)
  }
}

impl std::error::Error for UnknownLabel {}

/// Contributor experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl FromStr for ExperienceLevel {
  type Err = UnknownLabel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match fold_label(s).as_str() {
      "beginner" | "beginners" | "beginner friendly" | "novice" | "newbie" | "junior"
      | "entry level" => {
        Ok(ExperienceLevel::Beginner)
      }
      "intermediate" | "mid level" | "mid" => Ok(ExperienceLevel::Intermediate),
      "advanced" | "expert" | "experienced" | "senior" => Ok(ExperienceLevel::Advanced),
      _ => Err(UnknownLabel(s.to_string())),
    }
  }
}

impl fmt::Display for ExperienceLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ExperienceLevel::Beginner => "beginner",
      ExperienceLevel::Intermediate => "intermediate",
      ExperienceLevel::Advanced => "advanced",
    })
  }
}

/// How actively a project is maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
  High,
  Moderate,
  Low,
}

impl FromStr for ActivityLevel {
  type Err = UnknownLabel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match fold_label(s).as_str() {
      "high" | "active" | "very active" | "maintained" => Ok(ActivityLevel::High),
      "moderate" | "medium" => Ok(ActivityLevel::Moderate),
      "low" | "inactive" | "dormant" | "unmaintained" | "archived" => Ok(ActivityLevel::Low),
      _ => Err(UnknownLabel(s.to_string())),
    }
  }
}

impl fmt::Display for ActivityLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ActivityLevel::High => "high",
      ActivityLevel::Moderate => "moderate",
      ActivityLevel::Low => "low",
    })
  }
}

/// The kind of issue a contributor is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
  GoodFirstIssue,
  HelpWanted,
  Bug,
  Documentation,
  Enhancement,
}

impl FromStr for IssueKind {
  type Err = UnknownLabel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match fold_label(s).as_str() {
      "good first issue" | "good first issues" | "first issue" => Ok(IssueKind::GoodFirstIssue),
      "help wanted" => Ok(IssueKind::HelpWanted),
      "bug" | "bugs" | "bugfix" => Ok(IssueKind::Bug),
      "documentation" | "docs" | "doc" => Ok(IssueKind::Documentation),
      "enhancement" | "enhancements" | "feature" | "feature request" => {
        Ok(IssueKind::Enhancement)
      }
      _ => Err(UnknownLabel(s.to_string())),
    }
  }
}

impl fmt::Display for IssueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      IssueKind::GoodFirstIssue => "good first issue",
      IssueKind::HelpWanted => "help wanted",
      IssueKind::Bug => "bug",
      IssueKind::Documentation => "documentation",
      IssueKind::Enhancement => "enhancement",
    })
  }
}

/// Whether a count constraint is a lower bound, an upper bound or an exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
  AtLeast,
  AtMost,
  Exactly,
}

/// A numeric constraint on stars or contributors.
///
/// Normalizers emit the bound explicitly so that consumers never have to
/// re-read the matched text to know whether `100` meant "at least 100" or
/// "exactly 100".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountFilter {
  pub bound: Bound,
  pub value: u64,
}

impl CountFilter {
  pub fn at_least(value: u64) -> Self {
    Self { bound: Bound::AtLeast, value }
  }

  pub fn at_most(value: u64) -> Self {
    Self { bound: Bound::AtMost, value }
  }

  pub fn exactly(value: u64) -> Self {
    Self { bound: Bound::Exactly, value }
  }

  /// Returns `true` if `count` satisfies this constraint.
  pub fn matches(&self, count: u64) -> bool {
    match self.bound {
      Bound::AtLeast => count >= self.value,
      Bound::AtMost => count <= self.value,
      Bound::Exactly => count == self.value,
    }
  }
}

impl fmt::Display for CountFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.bound {
      Bound::AtLeast => write!(f, ">={}", self.value),
      Bound::AtMost => write!(f, "<={}", self.value),
      Bound::Exactly => write!(f, "={}", self.value),
    }
  }
}

/// The normalized value carried by an [`ExtractedMatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MatchValue {
  /// A single scalar, e.g. a canonical language name.
  Text(String),
  /// Several scalars from one match, e.g. `lang:rust,go`.
  List(Vec<String>),
  /// A numeric constraint.
  Count(CountFilter),
  Experience(ExperienceLevel),
  Activity(ActivityLevel),
  Issue(IssueKind),
}

/// A single recognized span of a query.
///
/// `start` and `end` are byte offsets into the query that was passed to the
/// parser, so `&query[m.start..m.end] == m.text` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMatch {
  /// The matched substring of the original query.
  pub text: String,
  /// The filter category this match contributes to.
  pub category: FilterCategory,
  /// Byte offset of the first matched byte.
  pub start: usize,
  /// Byte offset one past the last matched byte.
  pub end: usize,
  /// The normalized value.
  pub value: MatchValue,
  /// Weight of the pattern that produced the match, in `(0, 1]`.
  pub confidence: f32,
}

impl ExtractedMatch {
  /// Returns `true` if the two matches share at least one byte.
  pub fn overlaps(&self, other: &ExtractedMatch) -> bool {
    self.start < other.end && other.start < self.end
  }
}

/// Structured filters extracted from a query.
///
/// This is a partial record: a category that did not occur in the query is
/// `None` and is left out of the serialized form entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub languages: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frameworks: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub libraries: Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stars: Option<CountFilter>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contributors: Option<CountFilter>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub experience: Option<ExperienceLevel>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity: Option<ActivityLevel>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub issue: Option<IssueKind>,
}

impl SearchFilters {
  /// Returns `true` if no category is set.
  pub fn is_empty(&self) -> bool {
    self.categories().is_empty()
  }

  /// The categories that are present, in [`FilterCategory::ALL`] order.
  pub fn categories(&self) -> Vec<FilterCategory> {
    FilterCategory::ALL
      .into_iter()
      .filter(|category| self.has(*category))
      .collect()
  }

  /// Returns `true` if the given category is present.
  pub fn has(&self, category: FilterCategory) -> bool {
    match category {
      FilterCategory::Language => self.languages.is_some(),
      FilterCategory::Framework => self.frameworks.is_some(),
      FilterCategory::Library => self.libraries.is_some(),
      FilterCategory::Experience => self.experience.is_some(),
      FilterCategory::Stars => self.stars.is_some(),
      FilterCategory::Contributors => self.contributors.is_some(),
      FilterCategory::Activity => self.activity.is_some(),
      FilterCategory::Issue => self.issue.is_some(),
    }
  }

  /// Merges `other` into `self`.
  ///
  /// Multi-valued categories are unioned, keeping first-seen order.
  /// Single-valued categories present in `other` replace those in `self`.
  /// This is how a UI folds freshly parsed filters into a selection the
  /// user has already made.
  pub fn merge(&mut self, other: SearchFilters) {
    merge_set(&mut self.languages, other.languages);
    merge_set(&mut self.frameworks, other.frameworks);
    merge_set(&mut self.libraries, other.libraries);
    if other.stars.is_some() {
      self.stars = other.stars;
    }
    if other.contributors.is_some() {
      self.contributors = other.contributors;
    }
    if other.experience.is_some() {
      self.experience = other.experience;
    }
    if other.activity.is_some() {
      self.activity = other.activity;
    }
    if other.issue.is_some() {
      self.issue = other.issue;
    }
  }
}

fn merge_set(into: &mut Option<Vec<String>>, from: Option<Vec<String>>) {
  let Some(from) = from else {
    return;
  };
  let target = into.get_or_insert_with(Vec::new);
  for value in from {
    if !target.contains(&value) {
      target.push(value);
    }
  }
}

/// The result of parsing one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
  /// The query exactly as it was passed in.
  pub original_query: String,
  /// The structured filters, holding only the categories that were found.
  pub filters: SearchFilters,
  /// Every match, sorted by `start`, pairwise non-overlapping.
  pub matches: Vec<ExtractedMatch>,
  /// Overall confidence in `[0, 1]`.
  pub confidence: f32,
}

impl ParsedQuery {
  /// An empty result for `query`.
  pub fn empty(query: impl Into<String>) -> Self {
    Self {
      original_query: query.into(),
      filters: SearchFilters::default(),
      matches: Vec::new(),
      confidence: 0.0,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_labels_parse_with_any_separator() {
    assert_eq!("good-first-issue".parse::<IssueKind>(), Ok(IssueKind::GoodFirstIssue));
    assert_eq!("Good_First_Issue".parse::<IssueKind>(), Ok(IssueKind::GoodFirstIssue));
    assert_eq!("HELP wanted".parse::<IssueKind>(), Ok(IssueKind::HelpWanted));
    assert_eq!("Expert".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Advanced));
    assert_eq!("archived".parse::<ActivityLevel>(), Ok(ActivityLevel::Low));
    assert!("sometimes".parse::<ActivityLevel>().is_err());
  }

  #[test]
  fn test_count_filter_matches() {
    assert!(CountFilter::at_least(100).matches(100));
    assert!(!CountFilter::at_least(100).matches(99));
    assert!(CountFilter::at_most(10).matches(3));
    assert!(!CountFilter::exactly(5).matches(6));
    assert_eq!(CountFilter::at_least(1000).to_string(), ">=1000");
  }

  #[test]
  fn test_empty_filters_serialize_to_empty_object() {
    let json = serde_json::to_string(&SearchFilters::default()).unwrap();
    assert_eq!(json, "{}");
  }

  #[test]
  fn test_filters_serialize_only_present_keys() {
    let filters = SearchFilters {
      languages: Some(vec!["rust".to_string()]),
      stars: Some(CountFilter::at_least(100)),
      ..Default::default()
    };
    let value = serde_json::to_value(&filters).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(value["stars"]["bound"], "at_least");
    assert_eq!(value["stars"]["value"], 100);
    assert_eq!(
      filters.categories(),
      vec![FilterCategory::Language, FilterCategory::Stars]
    );
  }

  #[test]
  fn test_merge_unions_sets_and_overrides_scalars() {
    let mut base = SearchFilters {
      languages: Some(vec!["python".to_string()]),
      experience: Some(ExperienceLevel::Beginner),
      ..Default::default()
    };
    base.merge(SearchFilters {
      languages: Some(vec!["go".to_string(), "python".to_string()]),
      experience: Some(ExperienceLevel::Advanced),
      ..Default::default()
    });
    assert_eq!(
      base.languages,
      Some(vec!["python".to_string(), "go".to_string()])
    );
    assert_eq!(base.experience, Some(ExperienceLevel::Advanced));
    assert_eq!(base.activity, None);
  }

  #[test]
  fn test_skill_vocabulary() {
    assert_eq!(
      FilterCategory::Language.skill_category(),
      Some(SkillCategory::ProgrammingLanguage)
    );
    assert_eq!(FilterCategory::Stars.skill_category(), None);
    let json = serde_json::to_string(&SkillCategory::ProgrammingLanguage).unwrap();
    assert_eq!(json, "\"programming_language\"");
  }

  #[test]
  fn test_parsed_query_uses_camel_case() {
    let value = serde_json::to_value(ParsedQuery::empty("rust")).unwrap();
    assert_eq!(value["originalQuery"], "rust");
    assert_eq!(value["filters"], serde_json::json!({}));
  }
}
