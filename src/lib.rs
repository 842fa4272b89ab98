//! Querus - natural-language query parsing for repository search.
//!
//! Querus turns a free-text query such as
//! `"beginner friendly python projects with more than 1k stars"` into
//! structured filters (languages, frameworks, libraries, star and
//! contributor counts, experience level, activity level and issue kind),
//! together with the exact spans of the query each filter came from and an
//! overall confidence score.
//!
//! Recognition is driven by an ordered table of patterns. Each pattern binds
//! a [`Recognizer`](recognizers::Recognizer) to a filter category; earlier
//! patterns win when two of them match overlapping text.
//!
//! ```rust
//! use querus::prelude::*;
//!
//! let parsed = querus::parse("beginner friendly python projects with more than 1k stars");
//!
//! assert_eq!(parsed.filters.languages, Some(vec!["python".to_string()]));
//! assert_eq!(parsed.filters.experience, Some(ExperienceLevel::Beginner));
//! assert_eq!(parsed.filters.stars, Some(CountFilter::at_least(1_000)));
//! ```

pub mod types;
pub mod error;
pub mod config;
pub mod tokenizer;
pub mod recognizers;
pub mod pattern;
pub mod patterns;
pub mod extractor;
pub mod aggregate;
pub mod parser;
pub mod highlight;
#[cfg(feature = "parallel")]
pub mod cache;

pub use parser::parse;

pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::types::*;
    pub use crate::config::*;
    pub use crate::pattern::*;
    pub use crate::recognizers::*;
    pub use crate::parser::*;
    pub use crate::highlight::*;
    #[cfg(feature = "parallel")]
    pub use crate::cache::*;
}
