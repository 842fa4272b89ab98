//! The query parser that ties the pattern table, extractor and aggregator
//! together.

use crate::aggregate::aggregate;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::extractor::extract;
use crate::pattern::PatternTable;
use crate::patterns;
use crate::tokenizer::{floor_char_boundary, NormalizedText};
use crate::types::{ExtractedMatch, ParsedQuery};
use std::sync::{Arc, LazyLock};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Turns free-text repository queries into structured filters.
///
/// A `QueryParser` owns a validated [`ParserConfig`] and shares an immutable
/// [`PatternTable`]. Parsing never fails and never mutates the parser, so one
/// instance can serve every request of a process, from any number of threads.
///
/// Create a `QueryParser` with [`QueryParser::default`], [`QueryParser::new`]
/// or the [`QueryParserBuilder`].
///
/// # Examples
///
/// ```rust
/// use querus::prelude::*;
///
/// let parser = QueryParser::default();
/// let parsed = parser.parse("beginner friendly rust projects with more than 500 stars");
///
/// assert_eq!(parsed.filters.languages, Some(vec!["rust".to_string()]));
/// assert_eq!(parsed.filters.experience, Some(ExperienceLevel::Beginner));
/// assert_eq!(parsed.filters.stars, Some(CountFilter::at_least(500)));
/// ```
#[derive(Debug, Clone)]
pub struct QueryParser {
  /// The patterns, in priority order.
  table: Arc<PatternTable>,
  /// Length limit and confidence scale.
  config: ParserConfig,
}

impl QueryParser {
  /// Creates a parser with the built-in patterns for `config`.
  pub fn new(config: ParserConfig) -> Result<Self> {
    Self::builder().config(config).build()
  }

  /// Creates a new `QueryParserBuilder`.
  pub fn builder() -> QueryParserBuilder {
    QueryParserBuilder::new()
  }

  pub fn config(&self) -> &ParserConfig {
    &self.config
  }

  pub fn table(&self) -> &Arc<PatternTable> {
    &self.table
  }

  /// Parses one query.
  ///
  /// ## Steps
  ///
  /// 1. **Truncation**: the query is cut to `max_query_len` bytes, at a
  ///    character boundary.
  /// 2. **Normalization**: leading and trailing whitespace is dropped and
  ///    inner runs of whitespace become a single space. A query that is
  ///    empty after this yields [`ParsedQuery::empty`].
  /// 3. **Extraction**: the pattern table runs over the normalized text and
  ///    every match is mapped back onto the original query, so `start`,
  ///    `end` and `text` always describe the string that was passed in.
  /// 4. **Aggregation**: matches are folded into [`SearchFilters`].
  /// 5. **Scoring**: the match weights are summed and scaled into a
  ///    confidence in `[0, 1]`.
  ///
  /// [`SearchFilters`]: crate::types::SearchFilters
  pub fn parse(&self, query: &str) -> ParsedQuery {
    let cut = floor_char_boundary(query, self.config.max_query_len);
    let normalized = NormalizedText::new(&query[..cut]);
    if normalized.is_empty() {
      return ParsedQuery::empty(query);
    }

    let matches: Vec<ExtractedMatch> = extract(normalized.as_str(), &self.table)
      .into_iter()
      .map(|m| {
        let (start, end) = normalized.source_span(m.start, m.end);
        ExtractedMatch {
          text: query[start..end].to_string(),
          start,
          end,
          ..m
        }
      })
      .collect();

    let filters = aggregate(&matches);
    let confidence = confidence(&matches, self.config.confidence_scale);
    debug!(
      matches = matches.len(),
      categories = filters.categories().len(),
      confidence,
      truncated = cut < query.len(),
      "parsed query"
    );

    ParsedQuery {
      original_query: query.to_string(),
      filters,
      matches,
      confidence,
    }
  }

  /// Parses several queries, in parallel when the `parallel` feature is
  /// enabled. Results are in input order.
  pub fn parse_batch<S>(&self, queries: &[S]) -> Vec<ParsedQuery>
  where
    S: AsRef<str> + Sync,
  {
    #[cfg(feature = "parallel")]
    let iter = queries.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = queries.iter();

    iter.map(|q| self.parse(q.as_ref())).collect()
  }
}

impl Default for QueryParser {
  /// The default configuration over the shared built-in table.
  fn default() -> Self {
    Self {
      table: patterns::default_table(),
      config: ParserConfig::default(),
    }
  }
}

/// The overall confidence of a set of matches: the sum of their weights
/// divided by `scale`, clamped to `[0, 1]`.
pub fn confidence(matches: &[ExtractedMatch], scale: f32) -> f32 {
  if matches.is_empty() || !(scale > 0.0) {
    return 0.0;
  }
  let total: f32 = matches.iter().map(|m| m.confidence).sum();
  (total / scale).clamp(0.0, 1.0)
}

/// A builder for creating `QueryParser` instances.
///
/// # Examples
///
/// ```rust
/// use querus::prelude::*;
///
/// let table = PatternTable::builder()
///   .pattern(Pattern::keywords("issue:bug", FilterCategory::Issue, &["bug", "crash"])?
///     .with_normalizer(|_| Some(MatchValue::Issue(IssueKind::Bug))))
///   .build()?;
///
/// let parser = QueryParser::builder()
///   .config(ParserConfig::default().confidence_scale(1.0))
///   .table(table)
///   .build()?;
///
/// let parsed = parser.parse("fix a crash");
/// assert_eq!(parsed.filters.issue, Some(IssueKind::Bug));
/// assert_eq!(parsed.confidence, 1.0);
/// # Ok::<(), querus::error::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct QueryParserBuilder {
  config: ParserConfig,
  table: Option<Arc<PatternTable>>,
}

impl QueryParserBuilder {
  /// Creates a builder with the default configuration and the built-in
  /// patterns.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the configuration.
  pub fn config(mut self, config: ParserConfig) -> Self {
    self.config = config;
    self
  }

  /// Uses `table` instead of the built-in patterns.
  pub fn table(mut self, table: impl Into<Arc<PatternTable>>) -> Self {
    self.table = Some(table.into());
    self
  }

  /// Validates the configuration and builds the parser.
  ///
  /// Without an explicit table, the built-in patterns are used. They are
  /// shared with every other parser when the fuzzy options are the defaults,
  /// and built afresh otherwise.
  pub fn build(self) -> Result<QueryParser> {
    self.config.validate()?;
    let table = match self.table {
      Some(table) => table,
      None if self.config.fuzzy == ParserConfig::default().fuzzy => patterns::default_table(),
      None => Arc::new(patterns::builtin(&self.config)?),
    };
    Ok(QueryParser {
      table,
      config: self.config,
    })
  }
}

static DEFAULT_PARSER: LazyLock<QueryParser> = LazyLock::new(QueryParser::default);

/// Parses `query` with the default parser.
///
/// # Examples
///
/// ```rust
/// let parsed = querus::parse("python and go developer");
/// assert_eq!(
///   parsed.filters.languages,
///   Some(vec!["python".to_string(), "go".to_string()])
/// );
/// ```
pub fn parse(query: &str) -> ParsedQuery {
  DEFAULT_PARSER.parse(query)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::FuzzyOptions;
  use crate::error::Error;
  use crate::types::{CountFilter, FilterCategory};

  #[test]
  fn test_matches_point_into_original_query() {
    let query = "  more   than\t1k  stars ";
    let parsed = parse(query);
    assert_eq!(parsed.original_query, query);
    assert_eq!(parsed.matches.len(), 1);
    let m = &parsed.matches[0];
    assert_eq!(&query[m.start..m.end], m.text);
    assert_eq!(m.text, "more   than\t1k  stars");
    assert_eq!(parsed.filters.stars, Some(CountFilter::at_least(1_000)));
  }

  #[test]
  fn test_long_query_is_truncated() {
    let parser = QueryParser::new(ParserConfig::default().max_query_len(10)).unwrap();
    let parsed = parser.parse("rust and python");
    assert_eq!(parsed.filters.languages, Some(vec!["rust".to_string()]));
    assert_eq!(parsed.original_query, "rust and python");
  }

  #[test]
  fn test_truncation_respects_char_boundaries() {
    let parser = QueryParser::new(ParserConfig::default().max_query_len(6)).unwrap();
    let parsed = parser.parse("rust ééé");
    assert_eq!(parsed.matches.len(), 1);
  }

  #[test]
  fn test_confidence_is_scaled_and_clamped() {
    let parser = QueryParser::default();
    assert_eq!(parser.parse("rust").confidence, 1.0 / 3.0);
    assert_eq!(parser.parse("rust go python java").confidence, 1.0);
    assert_eq!(parser.parse("hello world").confidence, 0.0);
  }

  #[test]
  fn test_confidence_of_nothing_is_zero() {
    assert_eq!(confidence(&[], 3.0), 0.0);
  }

  #[test]
  fn test_invalid_config_is_rejected() {
    let result = QueryParser::new(ParserConfig::default().confidence_scale(-1.0));
    assert!(matches!(result, Err(Error::Config(_))));
  }

  #[test]
  fn test_default_parsers_share_the_table() {
    let a = QueryParser::default();
    let b = QueryParser::new(ParserConfig::default().max_query_len(64)).unwrap();
    assert!(Arc::ptr_eq(a.table(), b.table()));

    let c = QueryParser::new(ParserConfig::default().fuzzy(FuzzyOptions::disabled())).unwrap();
    assert!(!Arc::ptr_eq(a.table(), c.table()));
  }

  #[test]
  fn test_parse_batch_keeps_order() {
    let parser = QueryParser::default();
    let results = parser.parse_batch(&["rust", "", "100 stars"]);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].filters.categories(), vec![FilterCategory::Language]);
    assert!(results[1].matches.is_empty());
    assert_eq!(results[2].filters.stars, Some(CountFilter::exactly(100)));
  }
}
