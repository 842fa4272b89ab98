//! Error types for Querus.
//!
//! Parsing a query never fails. Errors only come from building a pattern
//! table or loading a configuration, both of which happen once at startup.

use thiserror::Error;

/// Main error type for Querus operations.
#[derive(Error, Debug)]
pub enum Error {
  /// The pattern table is invalid
  #[error("pattern error: {0}")]
  Pattern(#[from] PatternError),

  /// The parser configuration is invalid
  #[error("config error: {0}")]
  Config(#[from] ConfigError),
}

/// Pattern table construction errors.
#[derive(Error, Debug)]
pub enum PatternError {
  #[error("invalid regex for pattern '{name}': {source}")]
  InvalidRegex {
    name: String,
    #[source]
    source: regex::Error,
  },

  #[error("pattern '{0}' matches the empty string")]
  EmptyMatch(String),

  #[error("duplicate pattern name: {0}")]
  DuplicateName(String),

  #[error("pattern '{name}' has weight {weight}, expected a value in (0, 1]")]
  InvalidWeight { name: String, weight: f32 },

  #[error("pattern table is empty")]
  EmptyTable,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("invalid json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid value for {field}: {reason}")]
  InvalidValue { field: &'static str, reason: String },
}

/// Result type alias using the Querus error.
pub type Result<T> = std::result::Result<T, Error>;
