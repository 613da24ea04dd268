//! Registry configuration: where records live and which backend holds them.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! then `SMARTCARE_*` environment variables (e.g. `SMARTCARE_BACKEND=sqlite`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::store::{JsonFileStore, RecordStore, SqliteStore, StoreResult};
use crate::store::{DOCTOR_FILE, ID_TRACKER_FILE, PATIENT_FILE};

pub const DEFAULT_SQLITE_FILE: &str = "smartcare.db";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Directory holding every store file
    pub data_dir: PathBuf,
    pub backend: Backend,
    pub patient_file: String,
    pub doctor_file: String,
    pub id_tracker_file: String,
    pub sqlite_file: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            backend: Backend::Json,
            patient_file: PATIENT_FILE.into(),
            doctor_file: DOCTOR_FILE.into(),
            id_tracker_file: ID_TRACKER_FILE.into(),
            sqlite_file: DEFAULT_SQLITE_FILE.into(),
        }
    }
}

impl ClinicConfig {
    /// Load configuration, reading `file` when given (it must exist).
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("backend", "json")?
            .set_default("patient_file", defaults.patient_file)?
            .set_default("doctor_file", defaults.doctor_file)?
            .set_default("id_tracker_file", defaults.id_tracker_file)?
            .set_default("sqlite_file", defaults.sqlite_file)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("SMARTCARE"))
            .build()?
            .try_deserialize()
    }

    /// Open the configured backend.
    pub fn open_store(&self) -> StoreResult<Box<dyn RecordStore>> {
        match self.backend {
            Backend::Json => {
                tracing::debug!(dir = %self.data_dir.display(), "opening JSON store");
                Ok(Box::new(JsonFileStore::with_paths(
                    self.data_dir.join(&self.patient_file),
                    self.data_dir.join(&self.doctor_file),
                    self.data_dir.join(&self.id_tracker_file),
                )))
            }
            Backend::Sqlite => {
                std::fs::create_dir_all(&self.data_dir)?;
                let path = self.data_dir.join(&self.sqlite_file);
                tracing::debug!(path = %path.display(), "opening SQLite store");
                Ok(Box::new(SqliteStore::open(path)?))
            }
        }
    }
}
