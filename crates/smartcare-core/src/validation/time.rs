//! 12-hour / 24-hour appointment time conversion.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

/// Format operators type times in, e.g. `02:30 PM`.
pub const ENTRY_FORMAT: &str = "%I:%M %p";

/// Shape of an entered time. The meridiem must be separated by whitespace.
static ENTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{1,2}\s+[AaPp][Mm]$").unwrap());

/// Format times are stored in, e.g. `14:30`.
pub const STORAGE_FORMAT: &str = "%H:%M";

/// Parse an operator-entered 12-hour time.
pub fn parse_entry_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if !ENTRY_PATTERN.is_match(input) {
        return None;
    }
    NaiveTime::parse_from_str(input, ENTRY_FORMAT).ok()
}

/// Parse a stored 24-hour time.
pub fn parse_stored_time(stored: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(stored, STORAGE_FORMAT).ok()
}

/// Normalize a 12-hour entry to the 24-hour storage form.
pub fn to_storage_time(input: &str) -> Option<String> {
    parse_entry_time(input).map(|t| t.format(STORAGE_FORMAT).to_string())
}

/// Re-display a stored time in 12-hour form.
///
/// Falls back to the raw stored value when it does not parse.
pub fn to_display_time(stored: &str) -> String {
    match parse_stored_time(stored) {
        Some(t) => t.format(ENTRY_FORMAT).to_string(),
        None => {
            tracing::warn!(stored, "unparseable stored appointment time, displaying raw value");
            stored.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_storage_time() {
        assert_eq!(to_storage_time("02:30 PM").as_deref(), Some("14:30"));
        assert_eq!(to_storage_time("12:00 AM").as_deref(), Some("00:00"));
        assert_eq!(to_storage_time("12:15 PM").as_deref(), Some("12:15"));
        assert_eq!(to_storage_time("09:05 am").as_deref(), Some("09:05"));
        assert_eq!(to_storage_time("2:30 PM").as_deref(), Some("14:30"));
        assert_eq!(to_storage_time("2:5 PM").as_deref(), Some("14:05"));
        assert_eq!(to_storage_time("11:45   pm").as_deref(), Some("23:45"));
    }

    #[test]
    fn test_rejects_non_12_hour_input() {
        assert_eq!(to_storage_time("14:30"), None);
        assert_eq!(to_storage_time("13:00 PM"), None);
        assert_eq!(to_storage_time("02:61 PM"), None);
        assert_eq!(to_storage_time("half past two"), None);
        assert_eq!(to_storage_time(""), None);
        assert_eq!(to_storage_time("02:30PM"), None);
        assert_eq!(to_storage_time("02:30 P M"), None);
    }

    #[test]
    fn test_display_round_trip() {
        let stored = to_storage_time("02:30 PM").unwrap();
        assert_eq!(to_display_time(&stored), "02:30 PM");
        assert_eq!(to_display_time("00:45"), "12:45 AM");
    }

    #[test]
    fn test_display_falls_back_to_raw() {
        assert_eq!(to_display_time("2pm-ish"), "2pm-ish");
        assert_eq!(to_display_time(""), "");
    }
}
