//! Output module for writing harvested records
//!
//! This module handles:
//! - A pretty dump of the full record sequence
//! - Line-delimited JSON records
//! - A flattened word/phrase TSV export

mod json_lines;
mod pretty;
mod traits;
mod tsv;

pub use json_lines::JsonLinesFormatter;
pub use pretty::PrettyFormatter;
pub use traits::{OutputError, OutputFormat, OutputResult, RecordFormatter};
pub use tsv::{TsvFormatter, TSV_HEADER};

use crate::record::LessonRecord;
use std::io::Write;

/// Returns the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn RecordFormatter> {
    match format {
        OutputFormat::Pretty => Box::new(PrettyFormatter),
        OutputFormat::JsonLines => Box::new(JsonLinesFormatter),
        OutputFormat::Tsv => Box::new(TsvFormatter),
    }
}

/// Writes records in the chosen format and flushes the writer
///
/// # Arguments
///
/// * `format` - The output format
/// * `records` - Records in page-visit order
/// * `out` - Destination writer
pub fn write_records(
    format: OutputFormat,
    records: &[LessonRecord],
    out: &mut dyn Write,
) -> OutputResult<()> {
    tracing::debug!("Writing {} records as {}", records.len(), format);
    formatter_for(format).format(records, out)?;
    out.flush()?;
    Ok(())
}
