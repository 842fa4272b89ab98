//! The `Recognizer` capability and its built-in implementations.
//!
//! A recognizer finds spans of text that belong to a filter category. It
//! knows nothing about categories or values itself; a [`Pattern`] binds a
//! recognizer to a category and to the functions that turn the recognized
//! text into a value.
//!
//! # Available Recognizers
//!
//! - [`RegexRecognizer`]: compiled regular expressions with optional word
//!   boundary enforcement. Used for keyword lists, numeric phrases and
//!   `key:value` syntax.
//! - [`FuzzyRecognizer`]: typo-tolerant matching of single words against a
//!   vocabulary (requires the `fuzzy` feature).
//!
//! [`Pattern`]: crate::pattern::Pattern

use std::sync::Arc;

/// Implements typo-tolerant vocabulary matching.
#[cfg(feature = "fuzzy")]
pub mod fuzzy;
/// Implements regex-backed recognition.
pub mod regex_recognizer;

#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzyRecognizer;
pub use regex_recognizer::RegexRecognizer;

/// A span of text found by a [`Recognizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized<'t> {
  /// Byte offset of the first matched byte.
  pub start: usize,
  /// Byte offset one past the last matched byte.
  pub end: usize,
  /// The matched text.
  pub text: &'t str,
  /// Sub-matches, in order. For regex recognizers these are the capture
  /// groups `1..`; a group that did not participate is `None`.
  pub groups: Vec<Option<&'t str>>,
}

impl<'t> Recognized<'t> {
  /// A match without sub-matches.
  pub fn new(text: &'t str, start: usize, end: usize) -> Self {
    Self {
      start,
      end,
      text: &text[start..end],
      groups: Vec::new(),
    }
  }

  /// The sub-match at a 1-based index, mirroring regex group numbering.
  pub fn group(&self, index: usize) -> Option<&'t str> {
    index
      .checked_sub(1)
      .and_then(|i| self.groups.get(i).copied().flatten())
  }
}

/// A trait for components that locate spans of a query.
///
/// Recognizers must be pure: the same `text` and `from` always give the same
/// answer, and no state is kept between calls. This is what lets a single
/// pattern table serve any number of concurrent parses.
///
/// Recognizers must also have bounded cost. Implementations should be linear
/// scans or non-backtracking automata; there is no way to interrupt a
/// recognizer once it has started.
pub trait Recognizer: Send + Sync {
  /// Finds the first occurrence starting at or after byte offset `from`.
  ///
  /// `from` is always a char boundary of `text`. The returned span must be
  /// non-empty, start at or after `from`, and lie on char boundaries.
  fn find_at<'t>(&self, text: &'t str, from: usize) -> Option<Recognized<'t>>;
}

impl<R: Recognizer + ?Sized> Recognizer for Arc<R> {
  fn find_at<'t>(&self, text: &'t str, from: usize) -> Option<Recognized<'t>> {
    (**self).find_at(text, from)
  }
}

impl<R: Recognizer + ?Sized> Recognizer for Box<R> {
  fn find_at<'t>(&self, text: &'t str, from: usize) -> Option<Recognized<'t>> {
    (**self).find_at(text, from)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_group_is_one_based() {
    let recognized = Recognized {
      start: 0,
      end: 9,
      text: "stars>100",
      groups: vec![Some(">"), None, Some("100")],
    };
    assert_eq!(recognized.group(0), None);
    assert_eq!(recognized.group(1), Some(">"));
    assert_eq!(recognized.group(2), None);
    assert_eq!(recognized.group(3), Some("100"));
    assert_eq!(recognized.group(4), None);
  }
}
