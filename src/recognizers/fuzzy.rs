//! A `Recognizer` for typo-tolerant vocabulary matching.

use super::{Recognized, Recognizer};
use strsim::jaro_winkler;
use unicode_segmentation::UnicodeSegmentation;

/// A recognizer that finds words close to a known vocabulary using the
/// Jaro-Winkler similarity algorithm.
///
/// `FuzzyRecognizer` catches misspellings such as `pyhton` or `javscript`.
/// It works on whole Unicode words only. A word is a candidate when it is at
/// least `min_len` characters long, contains no digits, starts with the same
/// letter as the vocabulary entry and is at most two characters longer or
/// shorter than it.
///
/// Words that merely extend a known spelling (`rustic`, `reactor`, `nodes`)
/// are never matched, and neither are words that are a strict prefix of one
/// (`graph` against `graphql`).
pub struct FuzzyRecognizer {
  /// Lowercased spellings paired with the canonical name they stand for.
  entries: Vec<(String, String)>,
  /// The minimum similarity required to consider a word a match.
  threshold: f64,
  /// Words shorter than this, in characters, are ignored.
  min_len: usize,
}

impl FuzzyRecognizer {
  /// Creates a recognizer over `(spelling, canonical)` pairs with a default
  /// threshold of 0.93 and a minimum word length of 4.
  pub fn new<I, S, C>(entries: I) -> Self
  where
    I: IntoIterator<Item = (S, C)>,
    S: AsRef<str>,
    C: Into<String>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(spelling, canonical)| (spelling.as_ref().to_lowercase(), canonical.into()))
        .collect(),
      threshold: 0.93,
      min_len: 4,
    }
  }

  /// Sets the similarity threshold, from 0.0 to 1.0.
  pub fn with_threshold(mut self, threshold: f64) -> Self {
    self.threshold = threshold;
    self
  }

  /// Sets the minimum word length.
  pub fn with_min_len(mut self, min_len: usize) -> Self {
    self.min_len = min_len;
    self
  }

  /// Returns the canonical name closest to `word` and its similarity, if any
  /// entry clears the threshold.
  pub fn best_match(&self, word: &str) -> Option<(&str, f64)> {
    let word = word.to_lowercase();
    let word_len = word.chars().count();
    if word_len < self.min_len || word.chars().any(|c| c.is_ascii_digit()) {
      return None;
    }
    let initial = word.chars().next()?;
    if self
      .entries
      .iter()
      .any(|(spelling, _)| word.len() > spelling.len() && word.starts_with(spelling.as_str()))
    {
      return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for (spelling, canonical) in &self.entries {
      if !spelling.starts_with(initial) {
        continue;
      }
      let spelling_len = spelling.chars().count();
      if spelling_len < self.min_len || word_len.abs_diff(spelling_len) > 2 {
        continue;
      }
      if spelling.len() > word.len() && spelling.starts_with(word.as_str()) {
        continue;
      }

      let similarity = jaro_winkler(&word, spelling);
      if similarity >= self.threshold && best.map_or(true, |(_, score)| similarity > score) {
        best = Some((canonical.as_str(), similarity));
        if similarity >= 1.0 {
          break;
        }
      }
    }
    best
  }
}

impl Recognizer for FuzzyRecognizer {
  fn find_at<'t>(&self, text: &'t str, from: usize) -> Option<Recognized<'t>> {
    text
      .unicode_word_indices()
      .skip_while(|(offset, _)| *offset < from)
      .find(|(_, word)| self.best_match(word).is_some())
      .map(|(offset, word)| Recognized::new(text, offset, offset + word.len()))
  }
}
