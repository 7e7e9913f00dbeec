//! Date labels for grouping messages in a chat view.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const TODAY: &str = "Today";
pub const YESTERDAY: &str = "Yesterday";
pub const INVALID_DATE: &str = "Invalid Date";

/// Label an ISO date string relative to the current local date.
///
/// Returns `"Today"`, `"Yesterday"`, or the date as `M/D/YYYY`. Input that
/// cannot be parsed yields `"Invalid Date"`.
pub fn format_date_label(input: &str) -> String {
    format_date_label_on(input, Local::now().date_naive())
}

/// Same as [`format_date_label`] against an explicit `today`.
pub fn format_date_label_on(input: &str, today: NaiveDate) -> String {
    match parse_local_date(input) {
        Some(date) => date_label(date, today),
        None => INVALID_DATE.to_string(),
    }
}

/// Label a calendar date relative to `today`.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return TODAY.to_string();
    }
    if today.pred_opt() == Some(date) {
        return YESTERDAY.to_string();
    }
    date.format("%-m/%-d/%Y").to_string()
}

/// Parse an ISO 8601 date or date-time into a local calendar date.
fn parse_local_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            // Ambiguous or skipped local times (DST) still belong to this date
            return Some(
                Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .map(|dt| dt.date_naive())
                    .unwrap_or_else(|| naive.date()),
            );
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
