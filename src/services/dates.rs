//! Permissive date parsing for imported cells
//!
//! Spreadsheet exports disagree on how dates are typed, so every supported
//! layout is tried in a fixed order and the first match wins. A cell that
//! matches nothing is reported as absent rather than failing the import.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Canonical layout used for every timestamp the service emits
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a date string in any supported layout, interpreting date-only
/// layouts at midnight UTC.
///
/// Layouts, in order:
/// 1. `2025-08-04T00:00:00Z`
/// 2. RFC 3339 with an explicit offset (`2025-08-04T07:00:00+07:00`)
/// 3. `04-Aug-2025`
/// 4. `04-Aug-25`
/// 5. `8/4/2025`
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, CANONICAL_FORMAT) {
        return Some(naive.and_utc());
    }

    if let Ok(zoned) = DateTime::parse_from_rfc3339(input) {
        return Some(zoned.with_timezone(&Utc));
    }

    let date = parse_day_month_year(input, "%d-%b-%Y", '-')
        .or_else(|| parse_day_month_year(input, "%d-%b-%y", '-'))
        .or_else(|| parse_day_month_year(input, "%m/%d/%Y", '/'))?;

    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Parse and re-emit in [`CANONICAL_FORMAT`]; `None` when nothing matches
pub fn coerce_date(input: &str) -> Option<String> {
    parse_date(input).map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}

fn parse_day_month_year(input: &str, layout: &str, separator: char) -> Option<NaiveDate> {
    // chrono accepts short years for %Y, so the year width is checked here
    let expected_year_len = if layout.ends_with("%y") { 2 } else { 4 };
    let year = input.rsplit(separator).next()?;
    if year.len() != expected_year_len || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(input, layout).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_canonical_layout() {
        assert_eq!(parse_date("2025-08-04T00:00:00Z"), Some(midnight(2025, 8, 4)));
        assert_eq!(
            coerce_date("2025-08-04T00:00:00Z").as_deref(),
            Some("2025-08-04T00:00:00Z")
        );
    }

    #[test]
    fn test_explicit_offset_is_normalized_to_utc() {
        assert_eq!(
            coerce_date("2025-08-04T07:00:00+07:00").as_deref(),
            Some("2025-08-04T00:00:00Z")
        );
    }

    #[test]
    fn test_day_month_name_year() {
        assert_eq!(parse_date("04-Aug-2025"), Some(midnight(2025, 8, 4)));
        assert_eq!(parse_date("04-aug-2025"), Some(midnight(2025, 8, 4)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_date("04-Aug-25"), Some(midnight(2025, 8, 4)));
    }

    #[test]
    fn test_us_slash_layout() {
        assert_eq!(parse_date("8/4/2025"), Some(midnight(2025, 8, 4)));
        assert_eq!(parse_date("08/04/2025"), Some(midnight(2025, 8, 4)));
        assert_eq!(parse_date("12/31/2024"), Some(midnight(2024, 12, 31)));
    }

    #[test]
    fn test_every_layout_round_trips_to_the_same_instant() {
        for literal in ["2025-08-04T00:00:00Z", "04-Aug-2025", "04-Aug-25", "8/4/2025"] {
            let canonical = coerce_date(literal).unwrap();
            assert_eq!(canonical, "2025-08-04T00:00:00Z", "literal {}", literal);
            assert_eq!(parse_date(&canonical), parse_date(literal));
        }
    }

    #[test]
    fn test_empty_input_is_absent() {
        assert_eq!(parse_date(""), None);
        assert_eq!(coerce_date("   "), None);
    }

    #[test]
    fn test_gibberish_is_absent() {
        assert_eq!(coerce_date("not a date"), None);
        assert_eq!(coerce_date("2025-13-45"), None);
        assert_eq!(coerce_date("31-Foo-2025"), None);
    }

    #[test]
    fn test_short_year_in_four_digit_layout_is_rejected() {
        assert_eq!(parse_date("8/4/25"), None);
    }
}
