//! Field validation for the registration form.
//!
//! Handles:
//! - Patient names (letters, whitespace, hyphen, apostrophe)
//! - Contact numbers (optional `+`, 7 to 15 digits)
//! - Appointment times (12-hour entry, 24-hour storage)

mod time;

pub use time::*;

use std::sync::LazyLock;

use regex::Regex;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s\-']+$").unwrap());

static CONTACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

/// Check a patient name. Callers pass trimmed input.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Check a contact number. Callers pass trimmed input.
pub fn is_valid_contact(contact: &str) -> bool {
    CONTACT_PATTERN.is_match(contact)
}
