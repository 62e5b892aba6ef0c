//! Date formatting for cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Renders an ISO date or datetime as `YYYY-MM-DD`.
///
/// Unparseable input is returned unchanged.
pub fn date(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Renders an ISO datetime as `YYYY-MM-DD HH:MM:SS`.
///
/// Unparseable input is returned unchanged.
pub fn date_time(raw: &str) -> String {
    match parse(raw) {
        Some(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
