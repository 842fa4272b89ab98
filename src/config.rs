//! Parser configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Options controlling how queries are parsed and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Queries longer than this many bytes are cut at the nearest character
    /// boundary before matching. Recognizer cost is linear in query length,
    /// so this bounds the latency of a single parse.
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,
    /// Divisor applied to the summed match weights to obtain the overall
    /// confidence. With the default of 3.0, three exact keyword matches give
    /// full confidence.
    #[serde(default = "default_confidence_scale")]
    pub confidence_scale: f32,
    /// Typo-tolerant matching of language, framework and library names.
    #[serde(default)]
    pub fuzzy: FuzzyOptions,
}

fn default_max_query_len() -> usize {
    1024
}

fn default_confidence_scale() -> f32 {
    3.0
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_query_len: default_max_query_len(),
            confidence_scale: default_confidence_scale(),
            fuzzy: FuzzyOptions::default(),
        }
    }
}

impl ParserConfig {
    /// Load a configuration from a JSON document. Missing fields take their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum query length in bytes.
    pub fn max_query_len(mut self, max_query_len: usize) -> Self {
        self.max_query_len = max_query_len;
        self
    }

    /// Set the confidence divisor.
    pub fn confidence_scale(mut self, confidence_scale: f32) -> Self {
        self.confidence_scale = confidence_scale;
        self
    }

    /// Set the fuzzy matching options.
    pub fn fuzzy(mut self, fuzzy: FuzzyOptions) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_query_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_query_len",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(self.confidence_scale.is_finite() && self.confidence_scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "confidence_scale",
                reason: format!("must be a positive number, got {}", self.confidence_scale),
            });
        }
        self.fuzzy.validate()
    }
}

/// Options for typo-tolerant vocabulary matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyOptions {
    /// Whether fuzzy patterns are added to the built-in table. Has no effect
    /// when the crate is built without the `fuzzy` feature.
    #[serde(default = "default_fuzzy_enabled")]
    pub enabled: bool,
    /// Minimum Jaro-Winkler similarity between a query word and a known name.
    #[serde(default = "default_fuzzy_threshold")]
    pub threshold: f64,
    /// Words shorter than this are never fuzzy matched.
    #[serde(default = "default_fuzzy_min_len")]
    pub min_len: usize,
}

fn default_fuzzy_enabled() -> bool {
    true
}

fn default_fuzzy_threshold() -> f64 {
    0.93
}

fn default_fuzzy_min_len() -> usize {
    4
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            enabled: default_fuzzy_enabled(),
            threshold: default_fuzzy_threshold(),
            min_len: default_fuzzy_min_len(),
        }
    }
}

impl FuzzyOptions {
    /// Fuzzy matching switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the similarity threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the minimum word length.
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy.threshold",
                reason: format!("must be in (0, 1], got {}", self.threshold),
            });
        }
        if self.min_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy.min_len",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
