//! Payment timestamp parsing and display

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Build the display offset from a minute count, falling back to UTC when out of range
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

/// Parse a payment timestamp.
///
/// RFC 3339 strings carry their own offset. Date-times without an offset are
/// read in `local`; bare dates are midnight UTC.
pub fn parse_timestamp(raw: &str, local: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local.from_local_datetime(&naive).single();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

/// Epoch milliseconds, the value payments are ordered by
pub fn timestamp_millis(raw: &str, local: FixedOffset) -> Option<i64> {
    parse_timestamp(raw, local).map(|dt| dt.timestamp_millis())
}

/// Korean locale date-time, e.g. `2025. 11. 3. 오후 2:05:10`
pub fn format_korean(dt: &DateTime<FixedOffset>, local: FixedOffset) -> String {
    let dt = dt.with_timezone(&local);
    let (pm, hour) = dt.hour12();
    format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        if pm { "오후" } else { "오전" },
        hour,
        dt.minute(),
        dt.second()
    )
}

/// Display text for a raw timestamp; unparseable input is shown as-is
pub fn display_timestamp(raw: &str, local: FixedOffset) -> String {
    match parse_timestamp(raw, local) {
        Some(dt) => format_korean(&dt, local),
        None => raw.to_string(),
    }
}
