//! Explicit `key:value` filters such as `lang:rust,go` or `label:"help wanted"`.
//!
//! These are registered ahead of every natural-language pattern, so a value
//! written after a key is never picked up a second time by the vocabulary.

use super::vocabulary::{canonicalize, Term, FRAMEWORKS, LANGUAGES, LIBRARIES};
use crate::error::PatternError;
use crate::pattern::{Pattern, RawValue};
use crate::recognizers::Recognized;
use crate::types::{FilterCategory, MatchValue};
use std::str::FromStr;

/// One name in a list value: `rust`, `c++`, `next.js`, `.net`, `d3`. A name
/// holds at least one letter, so `lang:go,100` stops before `100`.
const NAME: &str = r"\.?\d*\p{Alphabetic}[\w+#]*(?:\.[\w+#]+)*";

/// A single word or a quoted phrase.
const LABEL: &str = r#"(?:"([^"]+)"|([\w-]+))"#;

fn split_list(m: &Recognized<'_>) -> Option<RawValue> {
  let values: Vec<String> = m
    .group(1)?
    .split(',')
    .map(str::trim)
    .filter(|value| !value.is_empty())
    .map(str::to_string)
    .collect();
  (!values.is_empty()).then_some(RawValue::Multiple(values))
}

/// A comma-separated list of names. The commas take no surrounding spaces,
/// so `lang:go, 100 stars` ends the list at `go`.
fn list(
  name: &str,
  category: FilterCategory,
  keys: &str,
  terms: &'static [Term],
) -> Result<Pattern, PatternError> {
  let regex = format!(r"(?i)\b(?:{keys})\s*:\s*({NAME}(?:,{NAME})*)");
  Ok(
    Pattern::regex(name, category, &regex)?
      .with_value_extractor(split_list)
      .with_normalizer(move |raw| {
        let values = match raw {
          RawValue::Multiple(values) => values,
          RawValue::Single(value) => vec![value],
        };
        let mut canonical: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
          let value = canonicalize(terms, &value);
          if !canonical.contains(&value) {
            canonical.push(value);
          }
        }
        Some(MatchValue::List(canonical))
      }),
  )
}

fn label<T, F>(
  name: &str,
  category: FilterCategory,
  keys: &str,
  into_value: F,
) -> Result<Pattern, PatternError>
where
  T: FromStr + 'static,
  F: Fn(T) -> MatchValue + Send + Sync + 'static,
{
  let regex = format!(r"(?i)\b(?:{keys})\s*:\s*{LABEL}");
  Ok(
    Pattern::regex(name, category, &regex)?
      .with_value_extractor(|m| m.group(1).or(m.group(2)).map(|v| RawValue::Single(v.to_string())))
      .with_normalizer(move |raw| match raw {
        RawValue::Single(value) => value.parse::<T>().ok().map(&into_value),
        RawValue::Multiple(_) => None,
      }),
  )
}

pub fn patterns() -> Result<Vec<Pattern>, PatternError> {
  Ok(vec![
    list("syntax:language", FilterCategory::Language, "lang|language|languages", LANGUAGES)?,
    list("syntax:framework", FilterCategory::Framework, "fw|framework|frameworks", FRAMEWORKS)?,
    list("syntax:library", FilterCategory::Library, "lib|libs|library|libraries", LIBRARIES)?,
    label(
      "syntax:level",
      FilterCategory::Experience,
      "level|experience|difficulty",
      MatchValue::Experience,
    )?,
    label("syntax:activity", FilterCategory::Activity, "activity", MatchValue::Activity)?,
    label("syntax:label", FilterCategory::Issue, "label|issue|issues", MatchValue::Issue)?,
  ])
}
