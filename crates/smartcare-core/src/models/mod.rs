//! Domain models for the SmartCare registry.

mod doctor;
mod id_tracker;
mod patient;

pub use doctor::*;
pub use id_tracker::*;
pub use patient::*;
