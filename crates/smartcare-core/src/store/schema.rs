//! SQLite schema definition.

/// Complete database schema for the SQLite backend.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    position INTEGER PRIMARY KEY,                -- storage (insertion) order
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 0),
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    contact TEXT NOT NULL,
    appointment_date TEXT NOT NULL,              -- YYYY-MM-DD
    appointment_time TEXT NOT NULL,              -- HH:MM (24-hour)
    appointment_day TEXT NOT NULL DEFAULT '',
    assigned_doctor TEXT NOT NULL,
    medical_history TEXT NOT NULL DEFAULT '',
    vital_signs TEXT NOT NULL DEFAULT '',
    physical_examination TEXT NOT NULL DEFAULT '',
    laboratory_tests TEXT NOT NULL DEFAULT '',
    doctor_advice TEXT NOT NULL DEFAULT '',
    follow_up TEXT NOT NULL DEFAULT '',
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_patients_id ON patients(id);

-- Booking slot lookups only consider active patients
CREATE INDEX IF NOT EXISTS idx_patients_slot
    ON patients(appointment_date, appointment_time, assigned_doctor)
    WHERE is_active = 1;

-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    position INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- ============================================================================
-- Daily ID counter (single row)
-- ============================================================================

CREATE TABLE IF NOT EXISTS id_tracker (
    singleton INTEGER PRIMARY KEY CHECK (singleton = 1),
    date TEXT NOT NULL,
    last_id INTEGER NOT NULL
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_single_tracker_row() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO id_tracker (singleton, date, last_id) VALUES (2, '2026-10-19', 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_gender_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            r#"INSERT INTO patients (id, name, age, gender, contact, appointment_date,
                                     appointment_time, assigned_doctor)
               VALUES ('x', 'A', 1, 'Unknown', '1234567', '2026-10-19', '09:00', 'Dr. A')"#,
            [],
        );
        assert!(result.is_err());
    }
}
