//! A `Recognizer` backed by a compiled regular expression.

use super::{Recognized, Recognizer};
use crate::tokenizer::is_word_char;
use regex::Regex;

/// A recognizer that matches a regular expression.
///
/// The `regex` crate guarantees linear-time matching, so a recognizer built
/// from any pattern has bounded cost.
///
/// When word boundaries are enforced (the default), a candidate is rejected
/// if it would cut through a word:
///
/// - a match that starts with a word character must not be preceded by a
///   word character, or by a `.` that is itself preceded by one (so `js`
///   does not match inside `next.js`);
/// - a match that ends with a word character must not be followed by a word
///   character, `+` or `#`, or by a `.` that is followed by a word character
///   (so `c` does not match `c++`, and `node` does not match `node.js`).
///
/// A rejected candidate is retried one character further on.
#[derive(Debug, Clone)]
pub struct RegexRecognizer {
  regex: Regex,
  word_bounded: bool,
}

impl RegexRecognizer {
  /// Compiles `pattern` into a word-bounded recognizer.
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    Ok(Self {
      regex: Regex::new(pattern)?,
      word_bounded: true,
    })
  }

  /// Builds a case-insensitive recognizer for a list of keywords.
  ///
  /// Spaces inside a keyword also match hyphens and underscores, so
  /// `"beginner friendly"` matches `beginner-friendly`. Longer keywords are
  /// tried first. With `versioned`, a version number written directly after
  /// the keyword is part of the match: `python3`, `go1.21`.
  pub fn keywords(keywords: &[&str], versioned: bool) -> Result<Self, regex::Error> {
    let mut sorted = keywords.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternation = sorted
      .iter()
      .map(|keyword| {
        keyword
          .split_whitespace()
          .map(regex::escape)
          .collect::<Vec<_>>()
          .join(r"[\s_-]+")
      })
      .collect::<Vec<_>>()
      .join("|");
    let suffix = if versioned { r"(?:\d+(?:\.\d+)*)?" } else { "" };

    Self::new(&format!("(?i)(?:{alternation}){suffix}"))
  }

  /// Enables or disables word boundary enforcement.
  pub fn word_bounded(mut self, word_bounded: bool) -> Self {
    self.word_bounded = word_bounded;
    self
  }

  /// The underlying regular expression.
  pub fn as_regex(&self) -> &Regex {
    &self.regex
  }
}

impl Recognizer for RegexRecognizer {
  fn find_at<'t>(&self, text: &'t str, from: usize) -> Option<Recognized<'t>> {
    let mut pos = from;
    while pos <= text.len() {
      let captures = self.regex.captures_at(text, pos)?;
      let whole = captures.get(0)?;

      if !self.word_bounded || on_word_boundaries(text, whole.start(), whole.end()) {
        return Some(Recognized {
          start: whole.start(),
          end: whole.end(),
          text: whole.as_str(),
          groups: (1..captures.len())
            .map(|i| captures.get(i).map(|g| g.as_str()))
            .collect(),
        });
      }

      let next = text[whole.start()..].chars().next()?;
      pos = whole.start() + next.len_utf8();
    }
    None
  }
}

/// Checks that `text[start..end]` does not cut through a word.
pub fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
  let matched = &text[start..end];

  if matched.chars().next().is_some_and(is_word_char) {
    let mut before = text[..start].chars().rev();
    match before.next() {
      Some(c) if is_word_char(c) => return false,
      Some('.') if before.next().is_some_and(is_word_char) => return false,
      _ => {}
    }
  }

  if matched.chars().next_back().is_some_and(is_word_char) {
    let mut after = text[end..].chars();
    match after.next() {
      Some(c) if is_word_char(c) || c == '+' || c == '#' => return false,
      Some('.') if after.next().is_some_and(is_word_char) => return false,
      _ => {}
    }
  }

  true
}
