//! Date-scoped patient identifiers backed by a persisted daily counter.
//!
//! Identifiers look like `2026-10-19-3`: the booking day followed by the
//! sequence number handed out on that day.

use chrono::NaiveDate;

use crate::models::{IdTracker, Patient};
use crate::store::{StoreError, StoreResult};

pub fn format_patient_id(date: NaiveDate, sequence: u32) -> String {
    format!("{}-{}", date.format("%Y-%m-%d"), sequence)
}

/// Pick the next free identifier for `today`.
///
/// Returns the identifier and the tracker state to persist once the
/// submission is accepted. Identifiers already present in `existing`
/// are skipped, so a lost or stale tracker never yields a duplicate.
/// A tracker whose counter cannot advance is reported as corrupt.
pub fn allocate_patient_id(
    tracker: Option<&IdTracker>,
    today: NaiveDate,
    existing: &[Patient],
) -> StoreResult<(String, IdTracker)> {
    let mut sequence = IdTracker::next_sequence(tracker, today).ok_or_else(exhausted)?;
    let mut id = format_patient_id(today, sequence);
    while existing.iter().any(|p| p.id == id) {
        tracing::warn!(%id, "patient id already taken, advancing daily counter");
        sequence = sequence.checked_add(1).ok_or_else(exhausted)?;
        id = format_patient_id(today, sequence);
    }
    Ok((
        id,
        IdTracker {
            date: today,
            last_id: sequence,
        },
    ))
}

fn exhausted() -> StoreError {
    StoreError::Corrupt("daily patient id counter exhausted".to_string())
}
