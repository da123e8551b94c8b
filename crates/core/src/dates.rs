//! Calendar-date parsing for user- and server-supplied date values.
//!
//! Every comparison in the domain is done on local calendar dates, so all
//! inputs resolve to a [`NaiveDate`] with the time of day dropped.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Display / wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time layouts accepted after ISO dates and RFC 3339 fail.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted as a last resort.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%Y.%m.%d", "%Y. %m. %d"];

/// A date value in any of the shapes the forms and the API produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// A calendar date.
    Date(NaiveDate),
    /// A local wall-clock date-time.
    DateTime(NaiveDateTime),
    /// Milliseconds since the Unix epoch, interpreted in local time.
    EpochMillis(i64),
    /// Free text, parsed with [`parse_date_text`].
    Text(String),
}

impl DateInput {
    /// Resolve to a local calendar date, or `None` if the value is not a date.
    pub fn to_local_date(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Date(date) => Some(*date),
            DateInput::DateTime(dt) => Some(dt.date()),
            DateInput::EpochMillis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .map(|dt| dt.date_naive()),
            DateInput::Text(text) => parse_date_text(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// Parse free text into a local calendar date.
///
/// A plain `yyyy-mm-dd` is taken as that local date. RFC 3339 timestamps are
/// converted to local time before the date is taken. A handful of other
/// common layouts are tried afterwards.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fundhub_core::dates::parse_date_text;
///
/// assert_eq!(parse_date_text("2025-03-01"), NaiveDate::from_ymd_opt(2025, 3, 1));
/// assert_eq!(parse_date_text("2025/03/01"), NaiveDate::from_ymd_opt(2025, 3, 1));
/// assert_eq!(parse_date_text("next tuesday"), None);
/// ```
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Format a calendar date as `yyyy-mm-dd`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_date_is_local_date() {
        assert_eq!(parse_date_text("2025-12-31"), Some(ymd(2025, 12, 31)));
        assert_eq!(parse_date_text("  2025-01-02  "), Some(ymd(2025, 1, 2)));
    }

    #[test]
    fn datetime_layouts_drop_time() {
        assert_eq!(parse_date_text("2025-06-01T23:59:59"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_date_text("2025-06-01T08:30"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_date_text("2025-06-01 08:30"), Some(ymd(2025, 6, 1)));
    }

    #[test]
    fn rfc3339_is_converted_to_local() {
        let expected = DateTime::parse_from_rfc3339("2025-06-01T12:00:00+09:00")
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_date_text("2025-06-01T12:00:00+09:00"), Some(expected));
    }

    #[test]
    fn alternate_separators() {
        assert_eq!(parse_date_text("2025/06/01"), Some(ymd(2025, 6, 1)));
        assert_eq!(parse_date_text("2025.06.01"), Some(ymd(2025, 6, 1)));
    }

    #[test]
    fn garbage_and_empty_are_rejected() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("   "), None);
        assert_eq!(parse_date_text("soon"), None);
        assert_eq!(parse_date_text("2025-13-40"), None);
    }

    #[test]
    fn epoch_millis_resolve_in_local_time() {
        let noon = Local
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .unwrap();
        let input = DateInput::EpochMillis(noon.timestamp_millis());
        assert_eq!(input.to_local_date(), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn untagged_deserialization_picks_variant() {
        let date: DateInput = serde_json::from_str("\"2025-03-01\"").unwrap();
        assert_eq!(date, DateInput::Date(ymd(2025, 3, 1)));

        let millis: DateInput = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(millis, DateInput::EpochMillis(1_700_000_000_000));

        let text: DateInput = serde_json::from_str("\"2025/03/01\"").unwrap();
        assert_eq!(text.to_local_date(), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn format_is_iso() {
        assert_eq!(format_date(ymd(2025, 1, 9)), "2025-01-09");
    }
}
