//! Property-based tests for the parse invariants.

use proptest::prelude::*;
use querus::prelude::*;

/// Queries built from recognizable words, numbers, operators and noise.
fn query_strategy() -> impl Strategy<Value = String> {
  let token = prop_oneof![
    Just("python".to_string()),
    Just("Go".to_string()),
    Just("c++".to_string()),
    Just("react native".to_string()),
    Just("beginner".to_string()),
    Just("advanced".to_string()),
    Just("stars".to_string()),
    Just("contributors".to_string()),
    Just(">".to_string()),
    Just(">=".to_string()),
    Just("more than".to_string()),
    Just("lang:rust,go".to_string()),
    Just("lang:go".to_string()),
    Just("rustic".to_string()),
    Just("good first issue".to_string()),
    Just("not maintained".to_string()),
    Just("pyhton".to_string()),
    "[0-9]{1,4}[km+]?",
    "[a-z]{1,8}",
    any::<String>(),
  ];
  let separator = prop_oneof![Just(" "), Just("  "), Just("\t"), Just(", "), Just("")];
  prop::collection::vec((token, separator), 0..8).prop_map(|parts| {
    parts
      .into_iter()
      .map(|(token, separator)| format!("{token}{separator}"))
      .collect()
  })
}

#[test]
fn prop_matches_are_sorted_and_disjoint() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    for pair in parsed.matches.windows(2) {
      prop_assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
  });
}

#[test]
fn prop_spans_point_into_the_query() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    for m in &parsed.matches {
      prop_assert!(m.start < m.end);
      prop_assert!(m.end <= query.len());
      prop_assert_eq!(&query[m.start..m.end], m.text.as_str());
    }
  });
}

#[test]
fn prop_filters_only_hold_matched_categories() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    for category in parsed.filters.categories() {
      prop_assert!(
        parsed.matches.iter().any(|m| m.category == category),
        "{} set without a match",
        category
      );
    }
    if parsed.matches.is_empty() {
      prop_assert!(parsed.filters.is_empty());
    }
  });
}

#[test]
fn prop_list_values_hold_a_letter() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    for name in parsed.filters.languages.iter().flatten() {
      prop_assert!(name.chars().any(char::is_alphabetic), "{:?} in {:?}", name, query);
    }
  });
}

#[test]
fn prop_parse_is_idempotent() {
  proptest!(|(query in query_strategy())| {
    prop_assert_eq!(querus::parse(&query), querus::parse(&query));
  });
}

#[test]
fn prop_confidence_is_a_probability() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    prop_assert!((0.0..=1.0).contains(&parsed.confidence));
    if parsed.matches.is_empty() {
      prop_assert_eq!(parsed.confidence, 0.0);
    }
  });
}

#[test]
fn prop_segments_rebuild_the_query() {
  proptest!(|(query in query_strategy())| {
    let parsed = querus::parse(&query);
    let rebuilt: String = parsed.segments().iter().map(|s| s.text).collect();
    prop_assert_eq!(rebuilt, query);
  });
}
