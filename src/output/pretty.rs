//! Human-readable record dump

use crate::output::traits::{OutputResult, RecordFormatter};
use crate::record::LessonRecord;
use std::io::Write;

/// Writes the whole record sequence as one pretty-printed debug dump
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyFormatter;

impl RecordFormatter for PrettyFormatter {
    fn format(&self, records: &[LessonRecord], out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "{:#?}", records)?;
        Ok(())
    }
}
