//! SmartCare Core Library
//!
//! Clinic patient registration, appointment booking and follow-up tracking
//! over a flat-file record store.
//!
//! # Architecture
//!
//! ```text
//!   Front end (CLI / mobile via UniFFI)
//!                │  PatientDraft, queries
//!                ▼
//!   ┌──────────────────────────────┐
//!   │ Clinic (one lock per action) │
//!   │  load → decide → save        │
//!   └──────┬───────────────┬───────┘
//!          │               │
//!          ▼               ▼
//!   booking + ids        views
//!   (validate, detect    (roster, search,
//!    double booking)      follow-ups, schedule)
//!          │
//!          ▼
//!   RecordStore: JSON files │ SQLite │ memory
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Doctor, IdTracker)
//! - [`validation`]: Name, contact and appointment time rules
//! - [`booking`]: Submission validation and double-booking detection
//! - [`ids`]: Date-scoped patient identifiers
//! - [`views`]: Read-side roster, search, follow-up and schedule views
//! - [`store`]: Persistence backends
//! - [`clinic`]: Request/response handlers tying it all together
//! - [`settings`]: Data location and backend selection

pub mod booking;
pub mod clinic;
pub mod clock;
pub mod ids;
pub mod models;
pub mod settings;
pub mod store;
pub mod validation;
pub mod views;

// Re-export commonly used types
pub use booking::{PatientDraft, Rejection};
pub use clinic::{Admission, Clinic, ClinicError, ClinicResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use models::{Doctor, Gender, IdTracker, Patient};
pub use settings::{Backend, ClinicConfig};
pub use store::{JsonFileStore, MemoryStore, RecordStore, SqliteStore, StoreError};
pub use views::{RosterEntry, ScheduleFilter, ScheduleOptions};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SmartCareError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<ClinicError> for SmartCareError {
    fn from(e: ClinicError) -> Self {
        match e {
            ClinicError::Rejected(r) => SmartCareError::Rejected(r.to_string()),
            ClinicError::NotFound(id) => SmartCareError::NotFound(id),
            other => SmartCareError::StorageError(other.to_string()),
        }
    }
}

impl From<StoreError> for SmartCareError {
    fn from(e: StoreError) -> Self {
        SmartCareError::StorageError(e.to_string())
    }
}

impl From<config::ConfigError> for SmartCareError {
    fn from(e: config::ConfigError) -> Self {
        SmartCareError::ConfigError(e.to_string())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, SmartCareError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SmartCareError::InvalidInput(format!("date {:?}: {}", s, e)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a registry backed by JSON files in `dir`.
#[uniffi::export]
pub fn open_json_registry(dir: String) -> Arc<SmartCareCore> {
    SmartCareCore::wrap(Clinic::with_system_clock(JsonFileStore::new(dir)))
}

/// Open a registry backed by a SQLite database at `path`.
#[uniffi::export]
pub fn open_sqlite_registry(path: String) -> Result<Arc<SmartCareCore>, SmartCareError> {
    let store = SqliteStore::open(Path::new(&path))?;
    Ok(SmartCareCore::wrap(Clinic::with_system_clock(store)))
}

/// Open the registry described by a config file (or defaults and environment).
#[uniffi::export]
pub fn open_configured_registry(
    config_path: Option<String>,
) -> Result<Arc<SmartCareCore>, SmartCareError> {
    let config = ClinicConfig::load(config_path.as_deref().map(Path::new))?;
    let store = config.open_store()?;
    Ok(SmartCareCore::wrap(Clinic::with_system_clock(store)))
}

/// Create an in-memory registry (for testing).
#[uniffi::export]
pub fn open_registry_in_memory() -> Arc<SmartCareCore> {
    SmartCareCore::wrap(Clinic::with_system_clock(MemoryStore::new()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic registry for FFI.
#[derive(uniffi::Object)]
pub struct SmartCareCore {
    clinic: Clinic,
}

impl SmartCareCore {
    fn wrap(clinic: Clinic) -> Arc<Self> {
        Arc::new(Self { clinic })
    }
}

#[uniffi::export]
impl SmartCareCore {
    // =========================================================================
    // Doctor Operations
    // =========================================================================

    /// Doctor display names, seeding the defaults on first use.
    pub fn doctors(&self) -> Result<Vec<String>, SmartCareError> {
        let doctors = self.clinic.doctors()?;
        Ok(doctors.into_iter().map(|d| d.name).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a patient and book their appointment.
    pub fn submit_patient(&self, draft: FfiPatientDraft) -> Result<FfiAdmission, SmartCareError> {
        let admission = self.clinic.submit_patient(draft.try_into()?)?;
        Ok(admission.into())
    }

    /// Mark a patient inactive.
    pub fn remove_patient(&self, id: String) -> Result<FfiPatient, SmartCareError> {
        Ok(self.clinic.remove_patient(&id)?.into())
    }

    /// Clear a patient's follow-up note.
    pub fn dismiss_follow_up(&self, id: String) -> Result<FfiPatient, SmartCareError> {
        Ok(self.clinic.dismiss_follow_up(&id)?.into())
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Active patients in registration order.
    pub fn roster(&self) -> Result<Vec<FfiPatient>, SmartCareError> {
        let rows = self.clinic.roster()?;
        Ok(rows.into_iter().map(|r| r.patient.into()).collect())
    }

    /// Search all patients by name.
    pub fn search_patients(&self, query: String) -> Result<Vec<FfiPatient>, SmartCareError> {
        let patients = self.clinic.search(&query)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Patients awaiting follow-up, optionally for one doctor.
    pub fn follow_ups(&self, doctor: Option<String>) -> Result<Vec<FfiPatient>, SmartCareError> {
        let patients = self.clinic.follow_ups(doctor.as_deref())?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Doctors that currently have follow-ups.
    pub fn follow_up_doctors(&self) -> Result<Vec<String>, SmartCareError> {
        Ok(self.clinic.follow_up_doctors()?)
    }

    /// Chronological schedule of active appointments.
    pub fn schedule(
        &self,
        date: Option<String>,
        doctor: Option<String>,
    ) -> Result<Vec<FfiPatient>, SmartCareError> {
        let filter = ScheduleFilter {
            date: date.as_deref().map(parse_date).transpose()?,
            doctor,
        };
        let patients = self.clinic.schedule(&filter)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Dates and doctors the schedule can be filtered by.
    pub fn schedule_options(&self) -> Result<FfiScheduleOptions, SmartCareError> {
        Ok(self.clinic.schedule_options()?.into())
    }
}

// =========================================================================
// FFI-Safe Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub appointment_date: String,
    pub appointment_time: String,
    /// 12-hour form of `appointment_time` (raw value if unparseable)
    pub display_time: String,
    pub appointment_day: String,
    pub assigned_doctor: String,
    pub medical_history: String,
    pub vital_signs: String,
    pub physical_examination: String,
    pub laboratory_tests: String,
    pub doctor_advice: String,
    pub follow_up: String,
    pub is_active: bool,
}

impl From<Patient> for FfiPatient {
    fn from(p: Patient) -> Self {
        Self {
            display_time: validation::to_display_time(&p.appointment_time),
            id: p.id,
            name: p.name,
            age: p.age,
            gender: p.gender.to_string(),
            contact: p.contact,
            appointment_date: p.appointment_date.to_string(),
            appointment_time: p.appointment_time,
            appointment_day: p.appointment_day,
            assigned_doctor: p.assigned_doctor,
            medical_history: p.medical_history,
            vital_signs: p.vital_signs,
            physical_examination: p.physical_examination,
            laboratory_tests: p.laboratory_tests,
            doctor_advice: p.doctor_advice,
            follow_up: p.follow_up,
            is_active: p.is_active,
        }
    }
}

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientDraft {
    pub name: String,
    pub age: u32,
    /// `Male`, `Female` or `Other`
    pub gender: String,
    pub contact: String,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
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

impl TryFrom<FfiPatientDraft> for PatientDraft {
    type Error = SmartCareError;

    fn try_from(d: FfiPatientDraft) -> Result<Self, Self::Error> {
        let gender: Gender = d.gender.parse().map_err(SmartCareError::InvalidInput)?;
        Ok(PatientDraft {
            appointment_date: parse_date(&d.appointment_date)?,
            name: d.name,
            age: d.age,
            gender,
            contact: d.contact,
            appointment_time: d.appointment_time,
            doctor: d.doctor,
            medical_history: d.medical_history,
            vital_signs: d.vital_signs,
            physical_examination: d.physical_examination,
            laboratory_tests: d.laboratory_tests,
            doctor_advice: d.doctor_advice,
            follow_up: d.follow_up,
        })
    }
}

/// FFI-safe accepted registration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAdmission {
    pub patient: FfiPatient,
    pub message: String,
}

impl From<Admission> for FfiAdmission {
    fn from(admission: Admission) -> Self {
        Self {
            message: admission.message(),
            patient: admission.patient.into(),
        }
    }
}

/// FFI-safe schedule filter choices.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScheduleOptions {
    pub dates: Vec<String>,
    pub doctors: Vec<String>,
}

impl From<ScheduleOptions> for FfiScheduleOptions {
    fn from(options: ScheduleOptions) -> Self {
        Self {
            dates: options.dates.iter().map(|d| d.to_string()).collect(),
            doctors: options.doctors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: NaiveDate) -> FfiPatientDraft {
        FfiPatientDraft {
            name: "Lea Salonga".into(),
            age: 50,
            gender: "female".into(),
            contact: "+6328123456".into(),
            appointment_date: date.to_string(),
            appointment_time: "11:45 AM".into(),
            doctor: "Dr. JR M., Pediatrician".into(),
            medical_history: String::new(),
            vital_signs: String::new(),
            physical_examination: String::new(),
            laboratory_tests: String::new(),
            doctor_advice: String::new(),
            follow_up: "Bring lab results".into(),
        }
    }

    fn tomorrow() -> NaiveDate {
        SystemClock.today().succ_opt().unwrap()
    }

    #[test]
    fn test_ffi_submit_and_views() {
        let core = open_registry_in_memory();
        let admission = core.submit_patient(draft(tomorrow())).unwrap();

        assert_eq!(admission.patient.appointment_time, "11:45");
        assert_eq!(admission.patient.display_time, "11:45 AM");
        assert_eq!(admission.patient.gender, "Female");
        assert!(admission.message.starts_with("Patient added and assigned to Dr. JR M."));

        assert_eq!(core.roster().unwrap().len(), 1);
        assert_eq!(core.follow_up_doctors().unwrap(), vec!["Dr. JR M., Pediatrician"]);

        let options = core.schedule_options().unwrap();
        assert_eq!(options.dates, vec![tomorrow().to_string()]);
    }

    #[test]
    fn test_ffi_error_mapping() {
        let core = open_registry_in_memory();
        core.submit_patient(draft(tomorrow())).unwrap();

        match core.submit_patient(draft(tomorrow())) {
            Err(SmartCareError::Rejected(msg)) => {
                assert_eq!(msg, Rejection::DoubleBooked.to_string())
            }
            other => panic!("expected double booking, got {:?}", other),
        }

        assert!(matches!(
            core.remove_patient("missing".into()),
            Err(SmartCareError::NotFound(_))
        ));

        let mut bad = draft(tomorrow());
        bad.appointment_date = "next week".into();
        assert!(matches!(
            core.submit_patient(bad),
            Err(SmartCareError::InvalidInput(_))
        ));

        assert!(matches!(
            core.schedule(Some("2026/10/19".into()), None),
            Err(SmartCareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ffi_json_registry_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        let id = open_json_registry(path.clone())
            .submit_patient(draft(tomorrow()))
            .unwrap()
            .patient
            .id;

        let reopened = open_json_registry(path);
        let found = reopened.search_patients("lea".into()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
    }
}
