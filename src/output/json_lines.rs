//! Line-delimited JSON output

use crate::output::traits::{OutputResult, RecordFormatter};
use crate::record::LessonRecord;
use std::io::Write;

/// Writes one JSON object per record, one record per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesFormatter;

impl RecordFormatter for JsonLinesFormatter {
    fn format(&self, records: &[LessonRecord], out: &mut dyn Write) -> OutputResult<()> {
        for record in records {
            serde_json::to_writer(&mut *out, record)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
