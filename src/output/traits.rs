//! Output formatter traits and types
//!
//! This module defines the trait interface for record sinks and the set of
//! output formats the binary can select from.

use crate::record::LessonRecord;
use serde::Deserialize;
use std::fmt;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Available output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable dump of all records
    Pretty,

    /// One JSON object per record per line
    JsonLines,

    /// Word/phrase table, oldest lesson first
    #[default]
    Tsv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::JsonLines => "json-lines",
            Self::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for record sinks
///
/// A formatter consumes the full, ordered record sequence produced by a crawl
/// and writes it to `out`.
pub trait RecordFormatter {
    /// Writes `records` to `out`
    ///
    /// # Arguments
    ///
    /// * `records` - Records in page-visit order
    /// * `out` - Destination writer
    fn format(&self, records: &[LessonRecord], out: &mut dyn Write) -> OutputResult<()>;
}
