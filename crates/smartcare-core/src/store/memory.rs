//! In-memory backend, used by tests and ephemeral sessions.

use super::{RecordStore, StoreResult};
use crate::models::{Doctor, IdTracker, Patient};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    id_tracker: Option<IdTracker>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    fn save_patients(&mut self, patients: &[Patient]) -> StoreResult<()> {
        self.patients = patients.to_vec();
        Ok(())
    }

    fn load_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    fn save_doctors(&mut self, doctors: &[Doctor]) -> StoreResult<()> {
        self.doctors = doctors.to_vec();
        Ok(())
    }

    fn load_id_tracker(&self) -> StoreResult<Option<IdTracker>> {
        Ok(self.id_tracker)
    }

    fn save_id_tracker(&mut self, tracker: &IdTracker) -> StoreResult<()> {
        self.id_tracker = Some(*tracker);
        Ok(())
    }
}
