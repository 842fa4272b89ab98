//! Text tokenization and whitespace normalization utilities.

use unicode_segmentation::UnicodeSegmentation;

/// Returns `true` for characters that can be part of a word.
pub fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// Split text into Unicode words, keeping each word's byte offset.
pub fn word_spans(text: &str) -> Vec<(usize, &str)> {
  text.unicode_word_indices().collect()
}

/// Largest char boundary of `text` that is `<= max`.
pub fn floor_char_boundary(text: &str, max: usize) -> usize {
  if max >= text.len() {
    return text.len();
  }
  let mut index = max;
  while !text.is_char_boundary(index) {
    index -= 1;
  }
  index
}

/// A query with leading and trailing whitespace removed and inner runs of
/// whitespace collapsed to a single space, together with a byte map back to
/// the text it was built from.
#[derive(Debug, Clone)]
pub struct NormalizedText {
  text: String,
  /// For each byte of `text`, the offset of the source character it came from.
  starts: Vec<usize>,
  /// For each byte of `text`, the offset just past that source character.
  ends: Vec<usize>,
}

impl NormalizedText {
  pub fn new(source: &str) -> Self {
    let mut text = String::with_capacity(source.len());
    let mut starts = Vec::with_capacity(source.len());
    let mut ends = Vec::with_capacity(source.len());
    let mut pending_space: Option<(usize, usize)> = None;

    for (offset, c) in source.char_indices() {
      let char_end = offset + c.len_utf8();
      if c.is_whitespace() {
        if pending_space.is_none() && !text.is_empty() {
          pending_space = Some((offset, char_end));
        }
        continue;
      }
      if let Some((space_start, space_end)) = pending_space.take() {
        text.push(' ');
        starts.push(space_start);
        ends.push(space_end);
      }
      text.push(c);
      for _ in 0..c.len_utf8() {
        starts.push(offset);
        ends.push(char_end);
      }
    }

    Self { text, starts, ends }
  }

  /// The normalized text.
  pub fn as_str(&self) -> &str {
    &self.text
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Map a non-empty byte range of the normalized text back to the source.
  pub fn source_span(&self, start: usize, end: usize) -> (usize, usize) {
    (self.starts[start], self.ends[end - 1])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_word_spans() {
    let spans = word_spans("Hello, wörld! c++");
    assert_eq!(spans, vec![(0, "Hello"), (7, "wörld"), (15, "c")]);
  }

  #[test]
  fn test_normalize_collapses_whitespace() {
    let normalized = NormalizedText::new("  stars \t >\n\n100  ");
    assert_eq!(normalized.as_str(), "stars > 100");
  }

  #[test]
  fn test_source_span_maps_back() {
    let source = "  stars \t >  100 ";
    let normalized = NormalizedText::new(source);
    let (start, end) = normalized.source_span(0, normalized.as_str().len());
    assert_eq!(&source[start..end], "stars \t >  100");
    let (start, end) = normalized.source_span(8, 11);
    assert_eq!(&source[start..end], "100");
  }

  #[test]
  fn test_source_span_with_multibyte_chars() {
    let source = "ünïcode\u{3000}rust";
    let normalized = NormalizedText::new(source);
    assert_eq!(normalized.as_str(), "ünïcode rust");
    let rust_start = normalized.as_str().find("rust").unwrap();
    let (start, end) = normalized.source_span(rust_start, rust_start + 4);
    assert_eq!(&source[start..end], "rust");
  }

  #[test]
  fn test_whitespace_only() {
    assert!(NormalizedText::new(" \t\n ").is_empty());
  }

  #[test]
  fn test_floor_char_boundary() {
    assert_eq!(floor_char_boundary("héllo", 2), 1);
    assert_eq!(floor_char_boundary("héllo", 3), 3);
    assert_eq!(floor_char_boundary("abc", 10), 3);
  }
}
