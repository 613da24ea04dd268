//! Persistence layer for patients, doctors and the daily ID counter.
//!
//! Every backend follows the same whole-collection contract: `load_*` returns
//! everything (empty when nothing is stored yet), `save_*` overwrites it.

mod json;
mod memory;
mod schema;
mod sqlite;

pub use json::*;
pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use thiserror::Error;

use crate::models::{Doctor, IdTracker, Patient};

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A whole-collection record store.
///
/// Writers take `&mut self`; the clinic service serializes them behind a lock.
pub trait RecordStore: Send {
    fn load_patients(&self) -> StoreResult<Vec<Patient>>;

    fn save_patients(&mut self, patients: &[Patient]) -> StoreResult<()>;

    fn load_doctors(&self) -> StoreResult<Vec<Doctor>>;

    fn save_doctors(&mut self, doctors: &[Doctor]) -> StoreResult<()>;

    fn load_id_tracker(&self) -> StoreResult<Option<IdTracker>>;

    fn save_id_tracker(&mut self, tracker: &IdTracker) -> StoreResult<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn load_patients(&self) -> StoreResult<Vec<Patient>> {
        (**self).load_patients()
    }

    fn save_patients(&mut self, patients: &[Patient]) -> StoreResult<()> {
        (**self).save_patients(patients)
    }

    fn load_doctors(&self) -> StoreResult<Vec<Doctor>> {
        (**self).load_doctors()
    }

    fn save_doctors(&mut self, doctors: &[Doctor]) -> StoreResult<()> {
        (**self).save_doctors(doctors)
    }

    fn load_id_tracker(&self) -> StoreResult<Option<IdTracker>> {
        (**self).load_id_tracker()
    }

    fn save_id_tracker(&mut self, tracker: &IdTracker) -> StoreResult<()> {
        (**self).save_id_tracker(tracker)
    }
}
