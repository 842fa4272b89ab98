//! Helpers for rendering a parsed query in a search box.

use crate::tokenizer::word_spans;
use crate::types::{ExtractedMatch, FilterCategory, ParsedQuery};
use serde::Serialize;
use std::ops::Range;

/// A piece of the original query, either plain text or a recognized filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'q> {
  pub text: &'q str,
  pub start: usize,
  pub end: usize,
  /// The category of the match covering this piece, if any.
  pub category: Option<FilterCategory>,
}

impl ParsedQuery {
  /// Splits the original query into consecutive segments.
  ///
  /// Every byte of the query belongs to exactly one segment, so
  /// concatenating the segment texts gives back `original_query`. Matched
  /// spans carry their category; the text between them does not.
  pub fn segments(&self) -> Vec<Segment<'_>> {
    let query = self.original_query.as_str();
    let mut segments = Vec::with_capacity(self.matches.len() * 2 + 1);
    let mut pos = 0;

    for m in &self.matches {
      if m.start > pos {
        segments.push(Segment {
          text: &query[pos..m.start],
          start: pos,
          end: m.start,
          category: None,
        });
      }
      segments.push(Segment {
        text: &query[m.start..m.end],
        start: m.start,
        end: m.end,
        category: Some(m.category),
      });
      pos = m.end;
    }

    if pos < query.len() {
      segments.push(Segment {
        text: &query[pos..],
        start: pos,
        end: query.len(),
        category: None,
      });
    }
    segments
  }

  /// The words of the query that no match covers, joined by single spaces.
  ///
  /// This is what remains for a plain text search once the filters have
  /// been taken out: `"rust web framework with 100+ stars"` leaves
  /// `"web framework with"`.
  pub fn free_text(&self) -> String {
    word_spans(&self.original_query)
      .into_iter()
      .filter(|(offset, word)| {
        let end = offset + word.len();
        !self.matches.iter().any(|m| *offset < m.end && m.start < end)
      })
      .map(|(_, word)| word)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl ExtractedMatch {
  /// The span of this match in UTF-16 code units, as used by JavaScript
  /// string offsets. `query` must be the query the match was taken from.
  pub fn utf16_range(&self, query: &str) -> Range<usize> {
    let start = utf16_len(&query[..self.start]);
    let len = utf16_len(&query[self.start..self.end]);
    start..start + len
  }
}

fn utf16_len(s: &str) -> usize {
  s.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
  use crate::parser::parse;
  use crate::types::FilterCategory;

  #[test]
  fn test_segments_cover_the_query() {
    let parsed = parse("rust projects with 100+ stars");
    let segments = parsed.segments();
    let joined: String = segments.iter().map(|s| s.text).collect();
    assert_eq!(joined, parsed.original_query);

    let tagged: Vec<_> = segments
      .iter()
      .map(|s| (s.text, s.category))
      .collect();
    assert_eq!(
      tagged,
      vec![
        ("rust", Some(FilterCategory::Language)),
        (" projects with ", None),
        ("100+ stars", Some(FilterCategory::Stars)),
      ]
    );
  }

  #[test]
  fn test_segments_of_plain_text() {
    let parsed = parse("hello there");
    let segments = parsed.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].category, None);
    assert!(parse("").segments().is_empty());
  }

  #[test]
  fn test_free_text() {
    let parsed = parse("rust web framework with 100+ stars");
    assert_eq!(parsed.free_text(), "web framework with");
    assert_eq!(parse("python").free_text(), "");
  }

  #[test]
  fn test_utf16_range() {
    let query = "🦀 rust";
    let parsed = parse(query);
    let m = &parsed.matches[0];
    assert_eq!((m.start, m.end), (5, 9));
    assert_eq!(m.utf16_range(query), 3..7);
  }
}
