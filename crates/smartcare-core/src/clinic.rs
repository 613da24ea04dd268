//! Request/response handlers for every clinic action.
//!
//! Each mutating handler loads the whole store, makes one decision and writes
//! the result back while holding the store lock, so concurrent callers inside
//! one process never lose updates.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::booking::{validate_booking, PatientDraft, Rejection};
use crate::clock::{Clock, SystemClock};
use crate::ids::allocate_patient_id;
use crate::models::{Doctor, Patient};
use crate::store::{RecordStore, StoreError};
use crate::views::{self, RosterEntry, ScheduleFilter, ScheduleOptions};

/// Clinic handler errors.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type ClinicResult<T> = Result<T, ClinicError>;

/// Outcome of an accepted registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    pub patient: Patient,
}

impl Admission {
    /// Confirmation shown to the operator.
    pub fn message(&self) -> String {
        format!(
            "Patient added and assigned to {} on {}.",
            self.patient.assigned_doctor, self.patient.appointment_day
        )
    }
}

/// The clinic registry: a record store plus the current date.
pub struct Clinic {
    store: Mutex<Box<dyn RecordStore>>,
    clock: Box<dyn Clock>,
}

impl Clinic {
    pub fn new<S, C>(store: S, clock: C) -> Self
    where
        S: RecordStore + 'static,
        C: Clock + 'static,
    {
        Self {
            store: Mutex::new(Box::new(store)),
            clock: Box::new(clock),
        }
    }

    /// Clinic using the host's local date.
    pub fn with_system_clock<S: RecordStore + 'static>(store: S) -> Self {
        Self::new(store, SystemClock)
    }

    fn lock(&self) -> ClinicResult<MutexGuard<'_, Box<dyn RecordStore>>> {
        self.store.lock().map_err(|_| ClinicError::LockPoisoned)
    }

    /// Doctor list, seeding and persisting the defaults when empty.
    pub fn doctors(&self) -> ClinicResult<Vec<Doctor>> {
        let mut store = self.lock()?;
        load_or_seed_doctors(&mut **store)
    }

    /// Validate a registration and persist it on success.
    ///
    /// A rejection leaves patients, doctors and the ID counter untouched.
    /// Default doctors are only persisted alongside an accepted patient.
    pub fn submit_patient(&self, draft: PatientDraft) -> ClinicResult<Admission> {
        let mut store = self.lock()?;
        let today = self.clock.today();
        let stored_doctors = store.load_doctors()?;
        let seed = stored_doctors.is_empty();
        let doctors = if seed {
            Doctor::defaults()
        } else {
            stored_doctors
        };
        let mut patients = store.load_patients()?;

        let booking = match validate_booking(draft, &patients, &doctors, today) {
            Ok(booking) => booking,
            Err(rejection) => {
                tracing::info!(reason = %rejection, "patient submission rejected");
                return Err(rejection.into());
            }
        };

        let tracker = store.load_id_tracker()?;
        let (id, tracker) = allocate_patient_id(tracker.as_ref(), today, &patients)?;
        let patient = booking.into_patient(id);

        if seed {
            store.save_doctors(&doctors)?;
            tracing::info!(count = doctors.len(), "seeded default doctors");
        }
        patients.push(patient.clone());
        store.save_patients(&patients)?;
        store.save_id_tracker(&tracker)?;

        tracing::info!(
            id = %patient.id,
            doctor = %patient.assigned_doctor,
            date = %patient.appointment_date,
            time = %patient.appointment_time,
            "patient registered"
        );
        Ok(Admission { patient })
    }

    /// Deactivate a patient. Deactivating twice is a no-op.
    pub fn remove_patient(&self, id: &str) -> ClinicResult<Patient> {
        self.update_patient(id, |p| p.is_active = false)
            .inspect(|p| tracing::info!(id = %p.id, "patient removed"))
    }

    /// Clear a patient's follow-up note; the patient stays active.
    pub fn dismiss_follow_up(&self, id: &str) -> ClinicResult<Patient> {
        self.update_patient(id, |p| p.follow_up.clear())
            .inspect(|p| tracing::info!(id = %p.id, "follow-up dismissed"))
    }

    fn update_patient<F>(&self, id: &str, mutate: F) -> ClinicResult<Patient>
    where
        F: FnOnce(&mut Patient),
    {
        let mut store = self.lock()?;
        let mut patients = store.load_patients()?;
        let patient = patients
            .iter_mut()
            .find(|p| !p.id.is_empty() && p.id == id)
            .ok_or_else(|| ClinicError::NotFound(id.to_string()))?;
        mutate(patient);
        let updated = patient.clone();
        store.save_patients(&patients)?;
        Ok(updated)
    }

    /// Every stored patient, active or not, in storage order.
    pub fn patients(&self) -> ClinicResult<Vec<Patient>> {
        Ok(self.lock()?.load_patients()?)
    }

    pub fn roster(&self) -> ClinicResult<Vec<RosterEntry>> {
        Ok(views::roster(&self.patients()?))
    }

    pub fn search(&self, query: &str) -> ClinicResult<Vec<Patient>> {
        Ok(views::search_by_name(&self.patients()?, query))
    }

    pub fn follow_ups(&self, doctor: Option<&str>) -> ClinicResult<Vec<Patient>> {
        Ok(views::follow_ups(&self.patients()?, doctor))
    }

    pub fn follow_up_doctors(&self) -> ClinicResult<Vec<String>> {
        Ok(views::follow_up_doctors(&self.patients()?))
    }

    pub fn schedule(&self, filter: &ScheduleFilter) -> ClinicResult<Vec<Patient>> {
        Ok(views::schedule(&self.patients()?, filter))
    }

    pub fn schedule_options(&self) -> ClinicResult<ScheduleOptions> {
        Ok(views::schedule_options(&self.patients()?))
    }
}

fn load_or_seed_doctors(store: &mut dyn RecordStore) -> ClinicResult<Vec<Doctor>> {
    let doctors = store.load_doctors()?;
    if !doctors.is_empty() {
        return Ok(doctors);
    }
    let defaults = Doctor::defaults();
    store.save_doctors(&defaults)?;
    tracing::info!(count = defaults.len(), "seeded default doctors");
    Ok(defaults)
}
