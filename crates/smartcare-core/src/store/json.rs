//! Flat-file JSON backend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{RecordStore, StoreResult};
use crate::models::{Doctor, IdTracker, Patient};

pub const PATIENT_FILE: &str = "patients.json";
pub const DOCTOR_FILE: &str = "doctors.json";
pub const ID_TRACKER_FILE: &str = "id_tracker.json";

/// Stores each collection as a pretty-printed JSON document.
///
/// Writes replace the whole file with no locking; concurrent processes
/// sharing the same files race and the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    patients_path: PathBuf,
    doctors_path: PathBuf,
    id_tracker_path: PathBuf,
}

impl JsonFileStore {
    /// Use the default file names inside `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::with_paths(
            dir.join(PATIENT_FILE),
            dir.join(DOCTOR_FILE),
            dir.join(ID_TRACKER_FILE),
        )
    }

    pub fn with_paths(
        patients_path: impl Into<PathBuf>,
        doctors_path: impl Into<PathBuf>,
        id_tracker_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            patients_path: patients_path.into(),
            doctors_path: doctors_path.into(),
            id_tracker_path: id_tracker_path.into(),
        }
    }

    pub fn patients_path(&self) -> &Path {
        &self.patients_path
    }

    pub fn doctors_path(&self) -> &Path {
        &self.doctors_path
    }

    pub fn id_tracker_path(&self) -> &Path {
        &self.id_tracker_path
    }
}

/// Read a JSON document, `None` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store file missing, treating as empty");
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&text)?))
}

/// Overwrite `path` with `value` using 4-space indentation.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn load_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(read_json(&self.patients_path)?.unwrap_or_default())
    }

    fn save_patients(&mut self, patients: &[Patient]) -> StoreResult<()> {
        write_json(&self.patients_path, patients)
    }

    fn load_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(read_json(&self.doctors_path)?.unwrap_or_default())
    }

    fn save_doctors(&mut self, doctors: &[Doctor]) -> StoreResult<()> {
        write_json(&self.doctors_path, doctors)
    }

    fn load_id_tracker(&self) -> StoreResult<Option<IdTracker>> {
        read_json(&self.id_tracker_path)
    }

    fn save_id_tracker(&mut self, tracker: &IdTracker) -> StoreResult<()> {
        write_json(&self.id_tracker_path, tracker)
    }
}
