//! Folds extracted matches into [`SearchFilters`].

use crate::types::{CountFilter, ExtractedMatch, FilterCategory, MatchValue, SearchFilters};
use std::str::FromStr;
use tracing::debug;

/// Builds the filters for a list of matches, in the order given.
///
/// Languages, frameworks and libraries collect every distinct value in the
/// order first seen. The other categories keep the value of their last
/// usable match. A match whose value does not fit its category is dropped,
/// and a category with no usable match is left unset.
pub fn aggregate(matches: &[ExtractedMatch]) -> SearchFilters {
  let mut filters = SearchFilters::default();

  for m in matches {
    let applied = match m.category {
      FilterCategory::Language => push_names(&mut filters.languages, &m.value),
      FilterCategory::Framework => push_names(&mut filters.frameworks, &m.value),
      FilterCategory::Library => push_names(&mut filters.libraries, &m.value),
      FilterCategory::Stars => replace(&mut filters.stars, count(&m.value)),
      FilterCategory::Contributors => replace(&mut filters.contributors, count(&m.value)),
      FilterCategory::Experience => replace(
        &mut filters.experience,
        label(&m.value, |v| match v {
          MatchValue::Experience(level) => Some(*level),
          _ => None,
        }),
      ),
      FilterCategory::Activity => replace(
        &mut filters.activity,
        label(&m.value, |v| match v {
          MatchValue::Activity(level) => Some(*level),
          _ => None,
        }),
      ),
      FilterCategory::Issue => replace(
        &mut filters.issue,
        label(&m.value, |v| match v {
          MatchValue::Issue(kind) => Some(*kind),
          _ => None,
        }),
      ),
    };

    if !applied {
      debug!(category = %m.category, text = %m.text, "dropped match with unusable value");
    }
  }

  filters
}

fn push_names(set: &mut Option<Vec<String>>, value: &MatchValue) -> bool {
  let names: &[String] = match value {
    MatchValue::Text(name) => std::slice::from_ref(name),
    MatchValue::List(names) => names,
    _ => return false,
  };
  if names.is_empty() {
    return false;
  }

  let set = set.get_or_insert_with(Vec::new);
  for name in names {
    if !set.contains(name) {
      set.push(name.clone());
    }
  }
  true
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
  match value {
    Some(value) => {
      *slot = Some(value);
      true
    }
    None => false,
  }
}

/// A count value, or a bare number written as text.
fn count(value: &MatchValue) -> Option<CountFilter> {
  match value {
    MatchValue::Count(filter) => Some(*filter),
    MatchValue::Text(text) => text.trim().parse().ok().map(CountFilter::exactly),
    _ => None,
  }
}

/// A typed label, or text that parses into one.
fn label<T: FromStr>(value: &MatchValue, typed: impl Fn(&MatchValue) -> Option<T>) -> Option<T> {
  match value {
    MatchValue::Text(text) => text.parse().ok(),
    other => typed(other),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{ActivityLevel, ExperienceLevel, IssueKind};

  fn found(category: FilterCategory, value: MatchValue) -> ExtractedMatch {
    ExtractedMatch {
      text: String::new(),
      category,
      start: 0,
      end: 1,
      value,
      confidence: 1.0,
    }
  }

  fn text(category: FilterCategory, value: &str) -> ExtractedMatch {
    found(category, MatchValue::Text(value.to_string()))
  }

  #[test]
  fn test_no_matches_gives_empty_filters() {
    let filters = aggregate(&[]);
    assert!(filters.is_empty());
    assert_eq!(serde_json::to_string(&filters).unwrap(), "{}");
  }

  #[test]
  fn test_multi_valued_categories_dedupe_in_order() {
    let filters = aggregate(&[
      text(FilterCategory::Language, "python"),
      text(FilterCategory::Language, "go"),
      found(
        FilterCategory::Language,
        MatchValue::List(vec!["go".to_string(), "rust".to_string()]),
      ),
      text(FilterCategory::Language, "python"),
    ]);
    assert_eq!(
      filters.languages,
      Some(vec!["python".to_string(), "go".to_string(), "rust".to_string()])
    );
    assert_eq!(filters.categories(), vec![FilterCategory::Language]);
  }

  #[test]
  fn test_single_valued_categories_keep_last() {
    let filters = aggregate(&[
      found(
        FilterCategory::Experience,
        MatchValue::Experience(ExperienceLevel::Beginner),
      ),
      found(
        FilterCategory::Experience,
        MatchValue::Experience(ExperienceLevel::Advanced),
      ),
      found(FilterCategory::Stars, MatchValue::Count(CountFilter::at_least(10))),
      found(FilterCategory::Stars, MatchValue::Count(CountFilter::at_most(5))),
    ]);
    assert_eq!(filters.experience, Some(ExperienceLevel::Advanced));
    assert_eq!(filters.stars, Some(CountFilter::at_most(5)));
  }

  #[test]
  fn test_text_values_are_parsed() {
    let filters = aggregate(&[
      text(FilterCategory::Issue, "good-first-issue"),
      text(FilterCategory::Activity, "Dormant"),
      text(FilterCategory::Contributors, "12"),
    ]);
    assert_eq!(filters.issue, Some(IssueKind::GoodFirstIssue));
    assert_eq!(filters.activity, Some(ActivityLevel::Low));
    assert_eq!(filters.contributors, Some(CountFilter::exactly(12)));
  }

  #[test]
  fn test_unusable_values_are_dropped() {
    let filters = aggregate(&[
      text(FilterCategory::Experience, "wizard"),
      text(FilterCategory::Stars, "lots"),
      found(FilterCategory::Language, MatchValue::List(Vec::new())),
      found(FilterCategory::Issue, MatchValue::Count(CountFilter::exactly(1))),
    ]);
    assert!(filters.is_empty());
  }

  #[test]
  fn test_unusable_value_keeps_earlier_one() {
    let filters = aggregate(&[
      text(FilterCategory::Experience, "beginner"),
      text(FilterCategory::Experience, "wizard"),
    ]);
    assert_eq!(filters.experience, Some(ExperienceLevel::Beginner));
  }
}
