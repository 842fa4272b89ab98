//! Runs a pattern table over a query.

use crate::pattern::{Pattern, PatternTable};
use crate::recognizers::Recognized;
use crate::types::ExtractedMatch;
use tracing::{trace, warn};

/// Extracts every match of `table` from `query`.
///
/// Patterns run in table order. Each pattern scans the whole query; a
/// candidate that intersects a span claimed by an earlier match is skipped,
/// as is one its normalizer rejects, and the scan resumes one character
/// after the candidate's start.
///
/// The result is sorted by `start` and its spans are pairwise disjoint.
pub fn extract(query: &str, table: &PatternTable) -> Vec<ExtractedMatch> {
  let mut matches = Vec::new();
  if query.is_empty() {
    return matches;
  }

  for pattern in table {
    scan(query, pattern, &mut matches);
  }

  matches.sort_by_key(|m| m.start);
  matches
}

fn scan(query: &str, pattern: &Pattern, matches: &mut Vec<ExtractedMatch>) {
  let mut from = 0;
  while from <= query.len() {
    let Some(found) = pattern.recognizer().find_at(query, from) else {
      break;
    };
    if !is_valid_span(query, from, &found) {
      warn!(
        pattern = pattern.name(),
        start = found.start,
        end = found.end,
        "recognizer returned an invalid span"
      );
      break;
    }

    let retry = next_char(query, found.start);
    if matches
      .iter()
      .any(|m| found.start < m.end && m.start < found.end)
    {
      from = retry;
      continue;
    }

    match pattern.value_of(&found) {
      Some(value) => {
        trace!(
          pattern = pattern.name(),
          start = found.start,
          end = found.end,
          "recorded match"
        );
        matches.push(ExtractedMatch {
          text: query[found.start..found.end].to_string(),
          category: pattern.category(),
          start: found.start,
          end: found.end,
          value,
          confidence: pattern.weight(),
        });
        from = found.end;
      }
      None => from = retry,
    }
  }
}

fn is_valid_span(query: &str, from: usize, found: &Recognized<'_>) -> bool {
  found.start >= from
    && found.start < found.end
    && found.end <= query.len()
    && query.is_char_boundary(found.start)
    && query.is_char_boundary(found.end)
}

/// Offset of the character after the one starting at `offset`.
fn next_char(query: &str, offset: usize) -> usize {
  query[offset..]
    .chars()
    .next()
    .map_or(query.len() + 1, |c| offset + c.len_utf8())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pattern::{Pattern, RawValue};
  use crate::recognizers::Recognizer;
  use crate::types::{FilterCategory, MatchValue};

  fn texts(matches: &[ExtractedMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.text.as_str()).collect()
  }

  #[test]
  fn test_empty_query() {
    let table = PatternTable::builder()
      .pattern(Pattern::keywords("bug", FilterCategory::Issue, &["bug"]).unwrap())
      .build()
      .unwrap();
    assert!(extract("", &table).is_empty());
  }

  #[test]
  fn test_earlier_pattern_claims_overlapping_text() {
    let table = PatternTable::builder()
      .pattern(
        Pattern::keywords("react-native", FilterCategory::Framework, &["react native"]).unwrap(),
      )
      .pattern(Pattern::keywords("react", FilterCategory::Framework, &["react"]).unwrap())
      .build()
      .unwrap();
    let matches = extract("react native and react", &table);
    assert_eq!(texts(&matches), vec!["react native", "react"]);
    assert_eq!(matches[1].start, 17);
  }

  #[test]
  fn test_output_is_sorted_by_start() {
    let table = PatternTable::builder()
      .pattern(Pattern::keywords("rust", FilterCategory::Language, &["rust"]).unwrap())
      .pattern(Pattern::keywords("bug", FilterCategory::Issue, &["bug"]).unwrap())
      .build()
      .unwrap();
    let matches = extract("bug in rust, another bug", &table);
    assert_eq!(texts(&matches), vec!["bug", "rust", "bug"]);
    assert!(matches.windows(2).all(|w| w[0].end <= w[1].start));
  }

  #[test]
  fn test_rejected_candidate_is_retried() {
    let even = Pattern::regex("even", FilterCategory::Stars, r"\d+")
      .unwrap()
      .with_normalizer(|raw| match raw {
        RawValue::Single(text) => text
          .parse::<u64>()
          .ok()
          .filter(|n| n % 2 == 0)
          .map(|n| MatchValue::Text(n.to_string())),
        RawValue::Multiple(_) => None,
      });
    let table = PatternTable::builder().pattern(even).build().unwrap();
    assert_eq!(texts(&extract("7 and 12 and 9", &table)), vec!["12"]);
  }

  #[test]
  fn test_default_value_is_matched_text() {
    let table = PatternTable::builder()
      .pattern(Pattern::keywords("rust", FilterCategory::Language, &["rust"]).unwrap())
      .build()
      .unwrap();
    let matches = extract("RUST", &table);
    assert_eq!(matches[0].value, MatchValue::Text("RUST".to_string()));
    assert_eq!(matches[0].confidence, 1.0);
  }

  struct OutOfBounds;

  impl Recognizer for OutOfBounds {
    fn find_at<'t>(&self, text: &'t str, _from: usize) -> Option<Recognized<'t>> {
      if text.is_empty() {
        return None;
      }
      Some(Recognized {
        start: 1,
        end: text.len() + 10,
        text,
        groups: Vec::new(),
      })
    }
  }

  #[test]
  fn test_invalid_span_is_skipped() {
    let table = PatternTable::builder()
      .pattern(Pattern::new("broken", FilterCategory::Issue, OutOfBounds))
      .pattern(Pattern::keywords("bug", FilterCategory::Issue, &["bug"]).unwrap())
      .build()
      .unwrap();
    assert_eq!(texts(&extract("a bug", &table)), vec!["bug"]);
  }
}
