//! Detail line parsing
//!
//! A detail line is the text of one `.details li` element, shaped
//! `label:value`. The value may span several lines.

use crate::record::{DetailKey, DetailValue};
use crate::{ParseError, ParseResult};
use regex::Regex;
use std::sync::LazyLock;

/// `label:value` with `.` matching newlines, anchored to the whole item text
static DETAIL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*(\S+):(.*)\z").expect("detail line pattern"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("space run pattern"));

/// Parses one detail line into its canonical key and normalized value
///
/// # Errors
///
/// * `ParseError::MalformedDetail` - the text is not shaped `label:value`
/// * `ParseError::UnknownLabel` - the label is outside the vocabulary
///
/// # Example
///
/// ```
/// use lesson_harvest::extract::parse_detail_line;
/// use lesson_harvest::{DetailKey, DetailValue};
///
/// let (key, value) = parse_detail_line("  単語: dog | cat |bird  ").unwrap();
/// assert_eq!(key, DetailKey::Words);
/// assert_eq!(value.as_list().unwrap(), ["dog", "cat", "bird"]);
/// ```
pub fn parse_detail_line(raw: &str) -> ParseResult<(DetailKey, DetailValue)> {
    let captures = DETAIL_LINE
        .captures(raw)
        .ok_or_else(|| ParseError::MalformedDetail {
            raw: raw.to_string(),
        })?;

    let label = captures[1].trim();
    let key = DetailKey::from_label(label).ok_or_else(|| ParseError::UnknownLabel {
        label: label.to_string(),
        raw: raw.to_string(),
    })?;

    let value = normalize_value(&captures[2]);
    let value = if key.is_multi_valued() {
        DetailValue::List(split_tokens(&value))
    } else {
        DetailValue::Text(value)
    };

    Ok((key, value))
}

/// Normalizes a raw detail value
///
/// Trims the value, turns CRLF into LF and collapses runs of two or more
/// spaces into one. Newlines are normalized before spaces are collapsed.
pub fn normalize_value(raw: &str) -> String {
    let value = raw.trim().replace("\r\n", "\n");
    SPACE_RUN.replace_all(&value, " ").into_owned()
}

/// Splits a `|`-separated value into trimmed tokens
///
/// Empty pieces at the end are removed before trimming. Empty tokens between
/// two separators stay, so every position in the list is kept.
fn split_tokens(value: &str) -> Vec<String> {
    let mut pieces: Vec<&str> = value.split('|').collect();
    while pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .collect()
}
