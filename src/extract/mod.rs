//! Record extraction from lesson history pages
//!
//! This module turns the markup of one lesson history page into typed
//! [`LessonRecord`]s and locates the page's forward pagination link.
//! Extraction is pure: the same markup always yields the same records.

mod detail;
mod time;

pub use detail::{normalize_value, parse_detail_line};
pub use time::{parse_lesson_no, parse_lesson_time};

use crate::record::LessonRecord;
use crate::ParseResult;
use chrono::FixedOffset;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Pagination glyph the portal uses for its "next page" link
pub const NEXT_PAGE_GLYPH: &str = "»";

/// UTC offset of the portal's lesson times (JST)
pub const PORTAL_UTC_OFFSET_SECS: i32 = 9 * 3600;

static RECORD_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector(".lessonRecord"));
static INSTRUCTOR_NAME: LazyLock<Selector> = LazyLock::new(|| selector(".instructorName"));
static HEADER_TIME: LazyLock<Selector> = LazyLock::new(|| selector(".lessonRecordHeader h2"));
static HEADER_LABEL: LazyLock<Selector> =
    LazyLock::new(|| selector(".lessonRecordHeader label"));
static DETAIL_ITEM: LazyLock<Selector> = LazyLock::new(|| selector(".details li"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Settings that shape extraction of a single page
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Offset applied to header times that carry no zone
    pub utc_offset: FixedOffset,

    /// Visible text of the forward pagination link
    pub next_link_text: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            utc_offset: FixedOffset::east_opt(PORTAL_UTC_OFFSET_SECS)
                .expect("portal offset in range"),
            next_link_text: NEXT_PAGE_GLYPH.to_string(),
        }
    }
}

/// Everything the crawler needs from one page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Records in document order
    pub records: Vec<LessonRecord>,

    /// Absolute URL of the next page, if the page links to one
    pub next_page: Option<Url>,
}

/// Extracts all lesson records from a page using the portal defaults
///
/// # Arguments
///
/// * `markup` - The page HTML
///
/// # Returns
///
/// * `Ok(Vec<LessonRecord>)` - One record per `.lessonRecord` block, in document order
/// * `Err(ParseError)` - A block could not be read; no partial result is returned
///
/// # Example
///
/// ```
/// use lesson_harvest::extract_records;
///
/// let html = r#"<div class="lessonRecord">
///   <div class="lessonRecordHeader"><h2>2016/03/04 19:00</h2><label>Lesson 3</label></div>
///   <span class="instructorName">Alice</span>
///   <ul class="details"><li>教材:Book 1</li></ul>
/// </div>"#;
/// let records = extract_records(html).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].lesson_no, Some(3));
/// ```
pub fn extract_records(markup: &str) -> ParseResult<Vec<LessonRecord>> {
    let document = Html::parse_document(markup);
    extract_from_document(&document, &ExtractOptions::default())
}

/// Same as [`extract_records`], localizing header times to `utc_offset`
pub fn extract_records_with_offset(
    markup: &str,
    utc_offset: FixedOffset,
) -> ParseResult<Vec<LessonRecord>> {
    let options = ExtractOptions {
        utc_offset,
        ..ExtractOptions::default()
    };
    let document = Html::parse_document(markup);
    extract_from_document(&document, &options)
}

/// Parses a page into records plus its next-page link
///
/// # Arguments
///
/// * `markup` - The page HTML
/// * `page_url` - URL the page was served from, for resolving relative links
/// * `options` - Offset and pagination settings
pub fn parse_page(markup: &str, page_url: &Url, options: &ExtractOptions) -> ParseResult<ParsedPage> {
    let document = Html::parse_document(markup);
    let records = extract_from_document(&document, options)?;
    let next_page = find_next_link(&document, &options.next_link_text, page_url);
    Ok(ParsedPage { records, next_page })
}

/// Extracts all records from an already parsed document
pub fn extract_from_document(
    document: &Html,
    options: &ExtractOptions,
) -> ParseResult<Vec<LessonRecord>> {
    document
        .select(&RECORD_BLOCK)
        .map(|block| extract_record(block, options))
        .collect()
}

/// Builds one record from a `.lessonRecord` block
fn extract_record(block: ElementRef<'_>, options: &ExtractOptions) -> ParseResult<LessonRecord> {
    let instructor_name = collect_text(block.select(&INSTRUCTOR_NAME));
    let lesson_time = parse_lesson_time(
        &collect_text(block.select(&HEADER_TIME)),
        options.utc_offset,
    )?;

    let mut record = LessonRecord::new(instructor_name.trim(), lesson_time);

    let mut labels = block.select(&HEADER_LABEL).peekable();
    if labels.peek().is_some() {
        record.lesson_no = Some(parse_lesson_no(&collect_text(labels))?);
    }

    for item in block.select(&DETAIL_ITEM) {
        let raw: String = item.text().collect();
        let (key, value) = parse_detail_line(&raw)?;
        if record.details.insert(key, value).is_some() {
            tracing::debug!("Detail '{}' repeated in one record, keeping the last", key);
        }
    }

    tracing::trace!(
        "Extracted lesson at {} with {} details",
        record.lesson_time,
        record.details.len()
    );

    Ok(record)
}

/// Concatenates the text of every matched element
fn collect_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements.flat_map(|element| element.text()).collect()
}

/// Finds the forward pagination link
///
/// Returns the first `<a href>` whose trimmed text equals `link_text`,
/// resolved against `base_url`. A link whose href cannot be resolved counts
/// as no link.
pub fn find_next_link(document: &Html, link_text: &str, base_url: &Url) -> Option<Url> {
    let element = document
        .select(&LINK)
        .find(|a| a.text().collect::<String>().trim() == link_text)?;

    let href = element.value().attr("href")?.trim();
    match base_url.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Ignoring next-page link {:?}: {}", href, e);
            None
        }
    }
}
