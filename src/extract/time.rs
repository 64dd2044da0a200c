//! Lesson header parsing: timestamp and lesson number

use crate::{ParseError, ParseResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::LazyLock;

/// Date and time as printed in lesson headers, e.g. `2016年03月04日(金) 19:00`,
/// `2016/03/04 午後7:00` or `2016/03/04 7:00 PM`. Nothing may follow the time.
static HEADER_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (\d{4}) \s* [-/.年] \s* (\d{1,2}) \s* [-/.月] \s* (\d{1,2}) \s* 日?
        (?: \s* [(（] [^)）]* [)）] )?
        [\sT]* (午前|午後)? \s*
        (\d{1,2}) \s* [:：] \s* (\d{2}) (?: \s* [:：] \s* (\d{2}) )?
        \s* (?i: ([ap]) \.? \s* m \.? )?
        \s* \z
        ",
    )
    .expect("header time pattern")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit run pattern"));

/// Parses a lesson header timestamp
///
/// RFC 3339 input keeps its own offset. Any other accepted shape carries no
/// zone and is read as local time at `offset`.
///
/// # Errors
///
/// Returns `ParseError::LessonTime` carrying the raw header text when no
/// timestamp can be read from it.
pub fn parse_lesson_time(raw: &str, offset: FixedOffset) -> ParseResult<DateTime<FixedOffset>> {
    let text = raw.trim();
    let fail = || ParseError::LessonTime {
        raw: raw.to_string(),
    };

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Ok(time);
    }

    let captures = HEADER_TIME.captures(text).ok_or_else(fail)?;
    let field = |index: usize| -> Option<u32> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
    };

    let year = captures[1].parse::<i32>().map_err(|_| fail())?;
    let month = field(2).ok_or_else(fail)?;
    let day = field(3).ok_or_else(fail)?;
    let minute = field(6).ok_or_else(fail)?;
    let second = field(7).unwrap_or(0);

    let afternoon = match (captures.get(4), captures.get(8)) {
        (Some(_), Some(_)) => return Err(fail()),
        (Some(jp), None) => Some(jp.as_str() == "午後"),
        (None, Some(latin)) => Some(latin.as_str().eq_ignore_ascii_case("p")),
        (None, None) => None,
    };
    let hour = to_24_hour(field(5).ok_or_else(fail)?, afternoon).ok_or_else(fail)?;

    let naive: NaiveDateTime = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(fail)?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(fail)
}

/// Converts a 12-hour clock reading to 24 hours
///
/// `None` for `afternoon` means the hour is already on a 24-hour clock.
/// A 12-hour reading must lie in 1..=12.
fn to_24_hour(hour: u32, afternoon: Option<bool>) -> Option<u32> {
    match afternoon {
        None => Some(hour),
        Some(_) if !(1..=12).contains(&hour) => None,
        Some(false) => Some(hour % 12),
        Some(true) => Some(hour % 12 + 12),
    }
}

/// Pulls the first run of digits out of a lesson label such as `Lesson No.42`
///
/// # Errors
///
/// Returns `ParseError::LessonNumber` when the label holds no digits or the
/// number does not fit.
pub fn parse_lesson_no(raw: &str) -> ParseResult<u32> {
    DIGIT_RUN
        .find(raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(|| ParseError::LessonNumber {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_japanese_header() {
        let time = parse_lesson_time("2016年03月04日(金) 19:00", jst()).unwrap();
        assert_eq!(time.to_rfc3339(), "2016-03-04T19:00:00+09:00");
    }

    #[test]
    fn test_full_width_parens_and_colon() {
        let time = parse_lesson_time(" 2016年3月4日（金）19：30 ", jst()).unwrap();
        assert_eq!((time.month(), time.day()), (3, 4));
        assert_eq!((time.hour(), time.minute()), (19, 30));
    }

    #[test]
    fn test_slash_header_with_seconds() {
        let time = parse_lesson_time("2015/12/31 07:05:09", jst()).unwrap();
        assert_eq!(time.to_rfc3339(), "2015-12-31T07:05:09+09:00");
    }

    #[test]
    fn test_header_uses_given_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let time = parse_lesson_time("2016-03-04 19:00", utc).unwrap();
        assert_eq!(time.to_rfc3339(), "2016-03-04T19:00:00+00:00");
    }

    #[test]
    fn test_rfc3339_keeps_its_offset() {
        let time = parse_lesson_time("2016-03-04T10:00:00Z", jst()).unwrap();
        assert_eq!(time.offset().local_minus_utc(), 0);
        assert_eq!(time.hour(), 10);
    }

    #[test]
    fn test_unparseable_header() {
        let err = parse_lesson_time("no lesson today", jst()).unwrap_err();
        assert_eq!(
            err,
            ParseError::LessonTime {
                raw: "no lesson today".to_string()
            }
        );
    }

    #[test]
    fn test_empty_header() {
        assert!(parse_lesson_time("", jst()).is_err());
    }

    #[test]
    fn test_impossible_date() {
        assert!(parse_lesson_time("2016/02/30 19:00", jst()).is_err());
        assert!(parse_lesson_time("2016/02/10 25:00", jst()).is_err());
    }

    #[test]
    fn test_latin_meridian() {
        let time = parse_lesson_time("2016/03/04 7:00 PM", jst()).unwrap();
        assert_eq!(time.to_rfc3339(), "2016-03-04T19:00:00+09:00");

        let time = parse_lesson_time("2016/03/04 7:30am", jst()).unwrap();
        assert_eq!((time.hour(), time.minute()), (7, 30));

        let time = parse_lesson_time("2016/03/04 12:15 a.m.", jst()).unwrap();
        assert_eq!(time.hour(), 0);

        let time = parse_lesson_time("2016/03/04 12:15 PM", jst()).unwrap();
        assert_eq!(time.hour(), 12);
    }

    #[test]
    fn test_japanese_meridian() {
        let time = parse_lesson_time("2016年03月04日(金) 午後7:00", jst()).unwrap();
        assert_eq!(time.to_rfc3339(), "2016-03-04T19:00:00+09:00");

        let time = parse_lesson_time("2016年03月04日(金) 午前9:00", jst()).unwrap();
        assert_eq!(time.hour(), 9);
    }

    #[test]
    fn test_meridian_with_24_hour_reading_fails() {
        assert!(parse_lesson_time("2016/03/04 19:00 PM", jst()).is_err());
        assert!(parse_lesson_time("2016/03/04 0:00 AM", jst()).is_err());
        assert!(parse_lesson_time("2016/03/04 午後7:00 PM", jst()).is_err());
    }

    #[test]
    fn test_unrecognised_suffix_fails() {
        let err = parse_lesson_time("2016/03/04 19:00 JST", jst()).unwrap_err();
        assert_eq!(
            err,
            ParseError::LessonTime {
                raw: "2016/03/04 19:00 JST".to_string()
            }
        );
        assert!(parse_lesson_time("2016/03/04 19:00 (cancelled)", jst()).is_err());
    }

    #[test]
    fn test_lesson_no() {
        assert_eq!(parse_lesson_no("Lesson No.42").unwrap(), 42);
        assert_eq!(parse_lesson_no("第7回 (全10回)").unwrap(), 7);
        assert_eq!(parse_lesson_no("0012").unwrap(), 12);
    }

    #[test]
    fn test_lesson_no_without_digits() {
        assert_eq!(
            parse_lesson_no("Lesson").unwrap_err(),
            ParseError::LessonNumber {
                raw: "Lesson".to_string()
            }
        );
    }
}
