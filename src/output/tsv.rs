//! Word and phrase table export
//!
//! Flattens the vocabulary of every lesson into a four-column TSV. Lessons are
//! written oldest first, which is the reverse of the portal's page order, and
//! every row gets an id from one counter shared by the whole export.

use crate::output::traits::{OutputResult, RecordFormatter};
use crate::record::LessonRecord;
use std::io::Write;

/// Column header of the export
pub const TSV_HEADER: [&str; 4] = ["id", "lesson_no", "type", "word_or_phrase"];

/// Writes one row per word or phrase token
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvFormatter;

impl RecordFormatter for TsvFormatter {
    fn format(&self, records: &[LessonRecord], out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "{}", TSV_HEADER.join("\t"))?;

        let mut id: u64 = 0;
        for record in records.iter().rev() {
            let lesson_no = record
                .lesson_no
                .map(|n| n.to_string())
                .unwrap_or_default();

            let rows = record
                .words()
                .iter()
                .map(|token| ("word", token))
                .chain(record.phrases().iter().map(|token| ("phrase", token)));

            for (kind, token) in rows {
                writeln!(out, "{}\t{}\t{}\t{}", id, lesson_no, kind, clean_cell(token))?;
                id += 1;
            }
        }

        Ok(())
    }
}

/// Replaces characters that would break the row structure
fn clean_cell(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}
