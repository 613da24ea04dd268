//! Patient models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient gender as offered by the registration form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gender: {}", s))
    }
}

fn default_active() -> bool {
    true
}

/// A registered patient together with their booked appointment.
///
/// Field names match the on-disk JSON layout of `patients.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Date-scoped identifier (`YYYY-MM-DD-N`); empty on legacy records
    #[serde(default)]
    pub id: String,
    /// Patient name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    /// Contact number, optional leading `+`
    pub contact: String,
    pub appointment_date: NaiveDate,
    /// 24-hour `HH:MM`
    pub appointment_time: String,
    /// Weekday name derived from `appointment_date` at booking time
    #[serde(default)]
    pub appointment_day: String,
    /// Display name of the assigned doctor
    pub assigned_doctor: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub vital_signs: String,
    #[serde(default)]
    pub physical_examination: String,
    #[serde(default)]
    pub laboratory_tests: String,
    /// Doctor's notes
    #[serde(default)]
    pub doctor_advice: String,
    /// Follow-up note; empty when no follow-up is required
    #[serde(default)]
    pub follow_up: String,
    /// Logical deletion flag
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Patient {
    /// Whether this patient currently sits in the follow-up queue.
    pub fn needs_follow_up(&self) -> bool {
        !self.follow_up.trim().is_empty()
    }

    /// Whether this patient occupies the given (date, time, doctor) slot.
    pub fn occupies(&self, date: NaiveDate, time: &str, doctor: &str) -> bool {
        self.is_active
            && self.appointment_date == date
            && self.appointment_time == time
            && self.assigned_doctor == doctor
    }

    /// Identifier for display, `N/A` on legacy records without one.
    pub fn display_id(&self) -> &str {
        or_placeholder(&self.id)
    }

    /// Cached weekday for display, `N/A` when missing.
    pub fn display_day(&self) -> &str {
        or_placeholder(&self.appointment_day)
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}
