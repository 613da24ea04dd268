//! Read-side views over the patient list.
//!
//! Roster and schedule only show active patients. Directory search and the
//! follow-up queue deliberately include deactivated ones so removed patients
//! can still be looked up and followed up.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::models::Patient;
use crate::validation::{parse_stored_time, to_display_time};

/// One row of the active-patient roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// 1-based position among active patients
    pub position: usize,
    pub patient: Patient,
    /// Appointment time in 12-hour form, or the raw stored value
    pub display_time: String,
}

impl fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.patient;
        writeln!(
            f,
            "{}. {} (ID: {}) - Age: {}, Gender: {}, Contact: {}",
            self.position,
            p.name,
            p.display_id(),
            p.age,
            p.gender,
            p.contact
        )?;
        write!(
            f,
            "   Appointment: {} at {} ({}) with {}",
            p.appointment_date,
            self.display_time,
            p.display_day(),
            p.assigned_doctor
        )
    }
}

/// Active patients in storage order.
pub fn roster(patients: &[Patient]) -> Vec<RosterEntry> {
    patients
        .iter()
        .filter(|p| p.is_active)
        .enumerate()
        .map(|(i, p)| RosterEntry {
            position: i + 1,
            display_time: to_display_time(&p.appointment_time),
            patient: p.clone(),
        })
        .collect()
}

/// Case-insensitive substring match on name, across all patients.
pub fn search_by_name(patients: &[Patient], query: &str) -> Vec<Patient> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Patients with a pending follow-up note, optionally for one doctor.
pub fn follow_ups(patients: &[Patient], doctor: Option<&str>) -> Vec<Patient> {
    patients
        .iter()
        .filter(|p| p.needs_follow_up())
        .filter(|p| doctor.map_or(true, |d| p.assigned_doctor == d))
        .cloned()
        .collect()
}

/// Distinct doctors among pending follow-ups, sorted.
pub fn follow_up_doctors(patients: &[Patient]) -> Vec<String> {
    patients
        .iter()
        .filter(|p| p.needs_follow_up())
        .map(|p| p.assigned_doctor.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Optional exact-match filters for the schedule view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
    pub doctor: Option<String>,
}

impl ScheduleFilter {
    fn matches(&self, patient: &Patient) -> bool {
        self.date.map_or(true, |d| patient.appointment_date == d)
            && self
                .doctor
                .as_deref()
                .map_or(true, |d| patient.assigned_doctor == d)
    }
}

/// Values the schedule filters can be set to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub dates: Vec<NaiveDate>,
    pub doctors: Vec<String>,
}

/// Active patients matching `filter`, in chronological order.
///
/// Records whose stored time does not parse sort after the parseable ones
/// on the same date and keep their storage order.
pub fn schedule(patients: &[Patient], filter: &ScheduleFilter) -> Vec<Patient> {
    let mut entries: Vec<Patient> = patients
        .iter()
        .filter(|p| p.is_active && filter.matches(p))
        .cloned()
        .collect();
    entries.sort_by_key(|p| {
        let time = parse_stored_time(&p.appointment_time);
        (p.appointment_date, time.is_none(), time)
    });
    entries
}

/// Distinct dates and doctors among active patients, sorted.
pub fn schedule_options(patients: &[Patient]) -> ScheduleOptions {
    let active = patients.iter().filter(|p| p.is_active);
    ScheduleOptions {
        dates: active
            .clone()
            .map(|p| p.appointment_date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        doctors: active
            .map(|p| p.assigned_doctor.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}
