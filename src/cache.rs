//! A concurrent memo of parse results, for search boxes that re-parse the
//! same prefixes as the user types and deletes.

use crate::parser::QueryParser;
use crate::types::ParsedQuery;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Caches [`ParsedQuery`] values by query string.
///
/// Parsing is pure, so a cached result is always identical to a fresh one.
/// The cache holds at most `capacity` entries and is emptied when it fills
/// up.
#[derive(Debug)]
pub struct ParseCache {
  parser: QueryParser,
  entries: DashMap<String, Arc<ParsedQuery>>,
  capacity: usize,
}

impl ParseCache {
  pub fn new(parser: QueryParser, capacity: usize) -> Self {
    Self {
      parser,
      entries: DashMap::new(),
      capacity: capacity.max(1),
    }
  }

  /// Returns the parse of `query`, computing it on a miss.
  pub fn parse(&self, query: &str) -> Arc<ParsedQuery> {
    if let Some(hit) = self.entries.get(query) {
      return Arc::clone(hit.value());
    }

    let parsed = Arc::new(self.parser.parse(query));
    if self.entries.len() >= self.capacity {
      debug!(capacity = self.capacity, "parse cache full, clearing");
      self.entries.clear();
    }
    self.entries.insert(query.to_string(), Arc::clone(&parsed));
    parsed
  }

  pub fn parser(&self) -> &QueryParser {
    &self.parser
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn clear(&self) {
    self.entries.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rayon::prelude::*;

  #[test]
  fn test_hit_returns_same_result() {
    let cache = ParseCache::new(QueryParser::default(), 8);
    let first = cache.parse("rust with 10 stars");
    let second = cache.parse("rust with 10 stars");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, cache.parser().parse("rust with 10 stars"));
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn test_clears_when_full() {
    let cache = ParseCache::new(QueryParser::default(), 2);
    cache.parse("r");
    cache.parse("ru");
    assert_eq!(cache.len(), 2);
    cache.parse("rus");
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
  }

  #[test]
  fn test_concurrent_parses() {
    let cache = ParseCache::new(QueryParser::default(), 64);
    let queries: Vec<String> = (0..32).map(|i| format!("go with {i} stars")).collect();
    let results: Vec<_> = queries.par_iter().map(|q| cache.parse(q)).collect();
    assert!(results.iter().all(|r| r.filters.languages.is_some()));
    assert_eq!(cache.len(), 32);
  }
}
