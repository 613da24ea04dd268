//! Doctor models.

use serde::{Deserialize, Serialize};

/// Doctors seeded into an empty doctor store.
pub const DEFAULT_DOCTORS: [&str; 2] = [
    "Dr. Kia Bannca P. Marabe, General Physician",
    "Dr. JR M., Pediatrician",
];

/// A doctor patients can be assigned to.
///
/// The display name carries title and specialty; there are no separate fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    pub name: String,
}

impl Doctor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The default roster used when no doctors are stored yet.
    pub fn defaults() -> Vec<Doctor> {
        DEFAULT_DOCTORS.iter().map(|name| Doctor::new(*name)).collect()
    }
}
