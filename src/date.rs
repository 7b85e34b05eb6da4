use crate::Record;
use chrono::prelude::*;
use thiserror::Error;

/// Accepted input formats, tried in this order; the day-first priority for
/// the slash and dash variants must not change, old rows depend on it.
pub const READ_DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d %H:%M:%S",
];

/// Formats accepted when saving a new entry, normalized to [`DATE_STORED_FORMAT`].
pub const ENTRY_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

pub const DATE_STORED_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date: {0:?}")]
pub struct DateParseError(pub String);

/// Parses free-form date text against [`READ_DATE_FORMATS`], whole-string
/// matches only, with a generic ISO 8601 parse as last resort.
pub fn parse_date(text: &str) -> Result<NaiveDateTime, DateParseError> {
    let text = text.trim();
    for &fmt in READ_DATE_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(d.and_time(NaiveTime::MIN));
        }
    }
    match text.parse::<NaiveDateTime>() {
        Ok(dt) => Ok(dt),
        Err(_) => Err(DateParseError(String::from(text))),
    }
}

/// Normalizes a user-entered date to the stored `YYYY-MM-DD` form.
pub fn normalize_entry_date(text: &str) -> Result<String, DateParseError> {
    let text = text.trim();
    for &fmt in ENTRY_DATE_FORMATS.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(d.format(DATE_STORED_FORMAT).to_string());
        }
    }
    Err(DateParseError(String::from(text)))
}

/// Stable sort by parsed date, ascending; a record whose date does not parse
/// sorts last instead of failing, so one bad row cannot block a plot.
pub fn sort_by_date(records: &mut [Record]) {
    records.sort_by_key(|r| parse_date(&r.date).unwrap_or(NaiveDateTime::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn rec(date: &str) -> Record {
        Record {
            date: String::from(date),
            ..Record::default()
        }
    }

    #[test]
    fn parses_stored_format() {
        assert_eq!(parse_date("2024-01-05").unwrap(), dt(2024, 1, 5, 0, 0, 0));
    }

    #[test]
    fn parses_slash_formats() {
        assert_eq!(parse_date("2024/03/04").unwrap(), dt(2024, 3, 4, 0, 0, 0));
        assert_eq!(parse_date("05/04/2024").unwrap(), dt(2024, 4, 5, 0, 0, 0));
    }

    #[test]
    fn dash_format_is_day_first() {
        assert_eq!(parse_date("01-02-2024").unwrap(), dt(2024, 2, 1, 0, 0, 0));
    }

    #[test]
    fn parses_datetime_format() {
        assert_eq!(
            parse_date("2024-01-05 13:30:00").unwrap(),
            dt(2024, 1, 5, 13, 30, 0)
        );
    }

    #[test]
    fn falls_back_to_iso8601() {
        assert_eq!(
            parse_date("2024-01-05T13:30:00").unwrap(),
            dt(2024, 1, 5, 13, 30, 0)
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_date("  2024-01-05 "), parse_date("2024-01-05"));
    }

    #[test]
    fn error_carries_the_offending_text() {
        let err = parse_date("not-a-date").unwrap_err();
        assert_eq!(err, DateParseError(String::from("not-a-date")));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn unparsable_dates_sort_last() {
        let mut records = vec![rec("2024-01-05"), rec("not-a-date"), rec("2024-01-01")];
        sort_by_date(&mut records);
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[1].date, "2024-01-05");
        assert_eq!(records[2].date, "not-a-date");
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let mut records = vec![rec("bad-one"), rec("bad-two"), rec("2024-01-01")];
        sort_by_date(&mut records);
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[1].date, "bad-one");
        assert_eq!(records[2].date, "bad-two");
    }

    #[test]
    fn entry_date_normalizes_to_stored_form() {
        assert_eq!(normalize_entry_date("2024-01-05").unwrap(), "2024-01-05");
        assert_eq!(normalize_entry_date("05/01/2024").unwrap(), "2024-01-05");
        assert_eq!(normalize_entry_date("2024/01/05").unwrap(), "2024-01-05");
    }

    #[test]
    fn entry_date_rejects_read_only_formats() {
        assert!(normalize_entry_date("01-02-2024").is_err());
        assert!(normalize_entry_date("2024-01-05 10:00:00").is_err());
    }
}
