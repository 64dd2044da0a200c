//! Lesson-Harvest: a lesson-history exporter
//!
//! This crate logs into a language-lesson portal, walks the learner's paginated
//! lesson history, extracts one typed record per lesson and writes the records
//! out as a pretty dump, JSON lines or a word/phrase TSV.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod state;

use thiserror::Error;

/// Main error type for Lesson-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Login failed with id={user:?}")]
    Authentication { user: String },

    #[error("No login form found at {url}")]
    MissingForm { url: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("ENV['{0}'] required")]
    MissingEnv(String),
}

/// Errors raised while turning lesson markup into records
///
/// Every variant carries the raw text that could not be understood, so a
/// change in the portal's markup shows up verbatim in the error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot parse as details: {raw:?}")]
    MalformedDetail { raw: String },

    #[error("unexpected detail keyword: {label:?} in {raw:?}")]
    UnknownLabel { label: String, raw: String },

    #[error("cannot parse lesson time: {raw:?}")]
    LessonTime { raw: String },

    #[error("no lesson number in label: {raw:?}")]
    LessonNumber { raw: String },
}

/// Result type alias for Lesson-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use config::{Config, Credentials};
pub use extract::{extract_records, extract_records_with_offset};
pub use record::{DetailKey, DetailValue, LessonRecord};
pub use state::CrawlState;
