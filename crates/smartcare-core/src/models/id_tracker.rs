//! Daily patient-ID counter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Last sequence number handed out on a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdTracker {
    pub date: NaiveDate,
    pub last_id: u32,
}

impl IdTracker {
    /// Sequence number that follows this tracker on `today`.
    ///
    /// The counter restarts at 1 whenever the stored date is not today.
    /// Returns `None` once the counter is exhausted.
    pub fn next_sequence(tracker: Option<&IdTracker>, today: NaiveDate) -> Option<u32> {
        match tracker {
            Some(t) if t.date == today => t.last_id.checked_add(1),
            _ => Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_next_sequence() {
        assert_eq!(IdTracker::next_sequence(None, day(19)), Some(1));

        let tracker = IdTracker { date: day(19), last_id: 4 };
        assert_eq!(IdTracker::next_sequence(Some(&tracker), day(19)), Some(5));
        assert_eq!(IdTracker::next_sequence(Some(&tracker), day(20)), Some(1));
    }

    #[test]
    fn test_exhausted_counter() {
        let tracker = IdTracker { date: day(19), last_id: u32::MAX };
        assert_eq!(IdTracker::next_sequence(Some(&tracker), day(19)), None);
        assert_eq!(IdTracker::next_sequence(Some(&tracker), day(20)), Some(1));
    }

    #[test]
    fn test_serialized_shape() {
        let tracker = IdTracker { date: day(19), last_id: 2 };
        let json = serde_json::to_string(&tracker).unwrap();
        assert_eq!(json, r#"{"date":"2026-10-19","last_id":2}"#);
    }
}
