// src/render/date.rs
// =============================================================================
// Formats commit timestamps for display, e.g. "2024-01-05T10:00:00Z" becomes
// "Jan 5, 2024".
//
// Month names are always English. The calendar date is taken in the
// timestamp's own offset, so the output never depends on the machine's
// timezone.
//
// This is a display helper, not a validator: anything that cannot be parsed
// is returned unchanged.
// =============================================================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

pub fn format_commit_date(iso_date: &str) -> String {
    let trimmed = iso_date.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return date.format(DISPLAY_FORMAT).to_string();
    }
    // Timestamps without an offset, then plain dates
    if let Ok(date) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return date.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format(DISPLAY_FORMAT).to_string();
    }

    debug!(input = iso_date, "unparseable commit date, showing it verbatim");
    iso_date.to_string()
}
