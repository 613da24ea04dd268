//! Appointment booking: validation and double-booking detection.
//!
//! A [`PatientDraft`] is what the operator typed into the registration form.
//! [`validate_booking`] runs the rules in a fixed order and reports the first
//! failure as a [`Rejection`]; nothing is written until every rule passes.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Doctor, Gender, Patient};
use crate::validation::{is_valid_contact, is_valid_name, to_storage_time};

/// Why a submission was refused. Messages are shown to the operator verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Name must only contain letters, spaces, hyphens, or apostrophes.")]
    InvalidName,

    #[error("Contact number must be digits or start with +, 7 to 15 characters.")]
    InvalidContact,

    #[error("Appointment time is required.")]
    MissingTime,

    #[error("Time must be in 12-hour format like 02:30 PM.")]
    UnparseableTime,

    #[error("Appointment date cannot be in the past.")]
    DateInPast,

    #[error("Selected doctor is not in the doctor list.")]
    UnknownDoctor,

    #[error("This doctor already has an appointment at the selected date and time.")]
    DoubleBooked,
}

/// Raw registration form input.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub appointment_date: NaiveDate,
    /// 12-hour entry such as `02:30 PM`
    pub appointment_time: String,
    pub doctor: String,
    pub medical_history: String,
    pub vital_signs: String,
    pub physical_examination: String,
    pub laboratory_tests: String,
    pub doctor_advice: String,
    pub follow_up: String,
}

impl PatientDraft {
    /// Draft with the required fields set and every clinical note empty.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        contact: impl Into<String>,
        appointment_date: NaiveDate,
        appointment_time: impl Into<String>,
        doctor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            contact: contact.into(),
            appointment_date,
            appointment_time: appointment_time.into(),
            doctor: doctor.into(),
            medical_history: String::new(),
            vital_signs: String::new(),
            physical_examination: String::new(),
            laboratory_tests: String::new(),
            doctor_advice: String::new(),
            follow_up: String::new(),
        }
    }
}

/// A draft that passed every rule, with normalized fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    draft: PatientDraft,
    name: String,
    contact: String,
    time_24h: String,
}

impl ValidatedBooking {
    /// Stored 24-hour appointment time.
    pub fn appointment_time(&self) -> &str {
        &self.time_24h
    }

    /// Weekday name of the appointment, e.g. `Tuesday`.
    pub fn appointment_day(&self) -> String {
        self.draft.appointment_date.format("%A").to_string()
    }

    /// Build the active patient record under the given identifier.
    pub fn into_patient(self, id: String) -> Patient {
        let appointment_day = self.appointment_day();
        let draft = self.draft;
        Patient {
            id,
            name: self.name,
            age: draft.age,
            gender: draft.gender,
            contact: self.contact,
            appointment_date: draft.appointment_date,
            appointment_time: self.time_24h,
            appointment_day,
            assigned_doctor: draft.doctor,
            medical_history: draft.medical_history,
            vital_signs: draft.vital_signs,
            physical_examination: draft.physical_examination,
            laboratory_tests: draft.laboratory_tests,
            doctor_advice: draft.doctor_advice,
            follow_up: draft.follow_up,
            is_active: true,
        }
    }
}

/// Run the booking rules against the current registry.
///
/// Rule order: name, contact, time present, time format, date not past,
/// doctor known, slot free.
pub fn validate_booking(
    draft: PatientDraft,
    patients: &[Patient],
    doctors: &[Doctor],
    today: NaiveDate,
) -> Result<ValidatedBooking, Rejection> {
    let name = draft.name.trim().to_string();
    if !is_valid_name(&name) {
        return Err(Rejection::InvalidName);
    }

    let contact = draft.contact.trim().to_string();
    if !is_valid_contact(&contact) {
        return Err(Rejection::InvalidContact);
    }

    let entered_time = draft.appointment_time.trim();
    if entered_time.is_empty() {
        return Err(Rejection::MissingTime);
    }
    let time_24h = to_storage_time(entered_time).ok_or(Rejection::UnparseableTime)?;

    if draft.appointment_date < today {
        return Err(Rejection::DateInPast);
    }

    if !doctors.iter().any(|d| d.name == draft.doctor) {
        return Err(Rejection::UnknownDoctor);
    }

    if find_conflict(patients, draft.appointment_date, &time_24h, &draft.doctor).is_some() {
        return Err(Rejection::DoubleBooked);
    }

    Ok(ValidatedBooking {
        draft,
        name,
        contact,
        time_24h,
    })
}

/// The active patient already holding this (date, time, doctor) slot, if any.
///
/// Matching is exact; appointments a minute apart do not conflict.
pub fn find_conflict<'a>(
    patients: &'a [Patient],
    date: NaiveDate,
    time_24h: &str,
    doctor: &str,
) -> Option<&'a Patient> {
    patients.iter().find(|p| p.occupies(date, time_24h, doctor))
}
