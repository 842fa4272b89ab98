//! Star and contributor count patterns.
//!
//! Every pattern here emits a [`CountFilter`] whose bound says how the number
//! was meant:
//!
//! | Query text | Value |
//! |---|---|
//! | `stars > 100`, `stars:>=100`, `more than 100 stars`, `100+ stars` | at least 100 |
//! | `stars < 100`, `under 100 stars`, `<100 stars` | at most 100 |
//! | `stars:100`, `stars = 100`, `100 stars` | exactly 100 |
//!
//! `>` and `>=` are not told apart, nor are `<` and `<=`: a threshold is
//! always inclusive of the number that was written.

use crate::error::PatternError;
use crate::pattern::{Pattern, RawValue};
use crate::recognizers::Recognized;
use crate::types::{Bound, CountFilter, FilterCategory, MatchValue};

/// A number with an optional `k`/`m` suffix: `1,000`, `1.5k`, `2m`, `10`.
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)([km])?";

const COMPARATOR: &str = r"(>=|<=|==|=|>|<)";

const AT_LEAST_WORDS: &str =
  r"more\s+than|greater\s+than|at\s+least|over|above|min(?:imum)?(?:\s+of)?";

const AT_MOST_WORDS: &str =
  r"less\s+than|fewer\s+than|at\s+most|under|below|up\s+to|max(?:imum)?(?:\s+of)?";

const STAR_NOUN: &str = r"(?:stars?|stargazers?|⭐)";

const CONTRIBUTOR_NOUN: &str = r"(?:contributors?|committers?|maintainers?)";

/// Parses a number and its magnitude suffix. Fractions are floored after
/// scaling, so `1.5k` is 1500 and `2.7` is 2.
pub fn parse_count(number: &str, suffix: Option<&str>) -> Option<u64> {
  let digits: String = number.chars().filter(|c| *c != ',').collect();
  let multiplier: u64 = match suffix.map(str::to_ascii_lowercase).as_deref() {
    Some("k") => 1_000,
    Some("m") => 1_000_000,
    _ => 1,
  };

  if digits.contains('.') {
    let value = digits.parse::<f64>().ok()? * multiplier as f64;
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
      return None;
    }
    Some(value.floor() as u64)
  } else {
    digits.parse::<u64>().ok()?.checked_mul(multiplier)
  }
}

/// Maps a comparison operator onto a bound.
pub fn bound_for(op: &str) -> Bound {
  match op {
    ">" | ">=" => Bound::AtLeast,
    "<" | "<=" => Bound::AtMost,
    _ => Bound::Exactly,
  }
}

/// Collects `[number, suffix]` from the given groups.
fn number_parts(m: &Recognized<'_>, number_group: usize) -> Option<RawValue> {
  let number = m.group(number_group)?;
  let suffix = m.group(number_group + 1).unwrap_or_default();
  Some(RawValue::Multiple(vec![number.to_string(), suffix.to_string()]))
}

fn count_from_parts(parts: &[String], bound: Bound) -> Option<MatchValue> {
  let (number, suffix) = match parts {
    [number, suffix] => (number, suffix),
    _ => return None,
  };
  let suffix = (!suffix.is_empty()).then_some(suffix.as_str());
  let value = parse_count(number, suffix)?;
  Some(MatchValue::Count(CountFilter { bound, value }))
}

/// A pattern whose bound is fixed by the pattern itself.
fn fixed_bound(
  name: String,
  category: FilterCategory,
  regex: &str,
  bound: Bound,
) -> Result<Pattern, PatternError> {
  Ok(
    Pattern::regex(name, category, regex)?
      .with_value_extractor(|m| number_parts(m, 1))
      .with_normalizer(move |raw| match raw {
        RawValue::Multiple(parts) => count_from_parts(&parts, bound),
        RawValue::Single(_) => None,
      }),
  )
}

/// Count patterns for one noun, in priority order.
fn count_patterns(category: FilterCategory, noun: &str) -> Result<Vec<Pattern>, PatternError> {
  let prefix = category.as_str();

  // `stars > 100`, `stars:>=1k`, `stars:100`
  let comparison = Pattern::regex(
    format!("{prefix}:comparison"),
    category,
    &format!(r"(?i){noun}\s*(?::\s*{COMPARATOR}?|{COMPARATOR})\s*{NUMBER}"),
  )?
  .with_value_extractor(|m| {
    let op = m.group(1).or(m.group(2)).unwrap_or("=");
    let number = m.group(3)?;
    let suffix = m.group(4).unwrap_or_default();
    Some(RawValue::Multiple(vec![
      op.to_string(),
      number.to_string(),
      suffix.to_string(),
    ]))
  })
  .with_normalizer(|raw| match raw {
    RawValue::Multiple(parts) if parts.len() == 3 => {
      count_from_parts(&parts[1..], bound_for(&parts[0]))
    }
    _ => None,
  });

  Ok(vec![
    comparison,
    // `more than 100 stars`, `>100 stars`
    fixed_bound(
      format!("{prefix}:at-least"),
      category,
      &format!(r"(?i)(?:(?:{AT_LEAST_WORDS})\s+|>=?\s*){NUMBER}\+?\s*{noun}"),
      Bound::AtLeast,
    )?,
    // `under 100 stars`, `<100 stars`
    fixed_bound(
      format!("{prefix}:at-most"),
      category,
      &format!(r"(?i)(?:(?:{AT_MOST_WORDS})\s+|<=?\s*){NUMBER}\s*{noun}"),
      Bound::AtMost,
    )?,
    // `100+ stars`
    fixed_bound(
      format!("{prefix}:plus"),
      category,
      &format!(r"(?i){NUMBER}\+\s*{noun}"),
      Bound::AtLeast,
    )?,
    // `100 stars`
    fixed_bound(
      format!("{prefix}:exact"),
      category,
      &format!(r"(?i){NUMBER}\s*{noun}"),
      Bound::Exactly,
    )?
    .with_weight(0.75),
  ])
}

/// Numeric star and contributor patterns.
pub fn patterns() -> Result<Vec<Pattern>, PatternError> {
  let mut patterns = count_patterns(FilterCategory::Stars, STAR_NOUN)?;
  patterns.extend(count_patterns(FilterCategory::Contributors, CONTRIBUTOR_NOUN)?);
  Ok(patterns)
}

fn heuristic(
  name: &str,
  category: FilterCategory,
  keywords: &[&str],
  filter: CountFilter,
) -> Result<Pattern, PatternError> {
  Ok(
    Pattern::keywords(name, category, keywords)?
      .with_normalizer(move |_| Some(MatchValue::Count(filter)))
      .with_weight(0.5),
  )
}

/// Vague popularity and community-size phrases.
pub fn heuristics() -> Result<Vec<Pattern>, PatternError> {
  Ok(vec![
    heuristic(
      "stars:popular",
      FilterCategory::Stars,
      &["very popular", "popular", "well known", "widely used", "highly starred"],
      CountFilter::at_least(1_000),
    )?,
    heuristic(
      "contributors:large",
      FilterCategory::Contributors,
      &[
        "large community",
        "big community",
        "huge community",
        "many contributors",
        "lots of contributors",
      ],
      CountFilter::at_least(50),
    )?,
    heuristic(
      "contributors:small",
      FilterCategory::Contributors,
      &[
        "small team",
        "small community",
        "few contributors",
        "solo project",
        "solo maintainer",
      ],
      CountFilter::at_most(10),
    )?,
  ])
}
