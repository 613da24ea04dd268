//! SQLite backend.
//!
//! Keeps the whole-collection contract of the JSON backend but stores
//! patients in an indexed table; `save_*` swaps table contents inside a
//! single transaction so a failed write leaves the previous state intact.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::{RecordStore, StoreError, StoreResult, SCHEMA};
use crate::models::{Doctor, Gender, IdTracker, Patient};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database connection wrapper.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl RecordStore for SqliteStore {
    fn load_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, gender, contact, appointment_date,
                   appointment_time, appointment_day, assigned_doctor,
                   medical_history, vital_signs, physical_examination,
                   laboratory_tests, doctor_advice, follow_up, is_active
            FROM patients
            ORDER BY position
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PatientRow {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                contact: row.get(4)?,
                appointment_date: row.get(5)?,
                appointment_time: row.get(6)?,
                appointment_day: row.get(7)?,
                assigned_doctor: row.get(8)?,
                medical_history: row.get(9)?,
                vital_signs: row.get(10)?,
                physical_examination: row.get(11)?,
                laboratory_tests: row.get(12)?,
                doctor_advice: row.get(13)?,
                follow_up: row.get(14)?,
                is_active: row.get(15)?,
            })
        })?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    fn save_patients(&mut self, patients: &[Patient]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM patients", [])?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO patients (
                    position, id, name, age, gender, contact, appointment_date,
                    appointment_time, appointment_day, assigned_doctor,
                    medical_history, vital_signs, physical_examination,
                    laboratory_tests, doctor_advice, follow_up, is_active
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
                "#,
            )?;
            for (position, p) in patients.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    p.id,
                    p.name,
                    p.age,
                    p.gender.as_str(),
                    p.contact,
                    p.appointment_date.format(DATE_FORMAT).to_string(),
                    p.appointment_time,
                    p.appointment_day,
                    p.assigned_doctor,
                    p.medical_history,
                    p.vital_signs,
                    p.physical_examination,
                    p.laboratory_tests,
                    p.doctor_advice,
                    p.follow_up,
                    p.is_active,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_doctors(&self) -> StoreResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM doctors ORDER BY position")?;
        let rows = stmt.query_map([], |row| Ok(Doctor { name: row.get(0)? }))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn save_doctors(&mut self, doctors: &[Doctor]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM doctors", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO doctors (position, name) VALUES (?1, ?2)")?;
            for (position, doctor) in doctors.iter().enumerate() {
                stmt.execute(params![position as i64, doctor.name])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_id_tracker(&self) -> StoreResult<Option<IdTracker>> {
        let row: Option<(String, u32)> = self
            .conn
            .query_row(
                "SELECT date, last_id FROM id_tracker WHERE singleton = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(date, last_id)| {
            Ok(IdTracker {
                date: parse_date(&date)?,
                last_id,
            })
        })
        .transpose()
    }

    fn save_id_tracker(&mut self, tracker: &IdTracker) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO id_tracker (singleton, date, last_id) VALUES (1, ?1, ?2)
            ON CONFLICT(singleton) DO UPDATE SET
                date = excluded.date,
                last_id = excluded.last_id
            "#,
            params![tracker.date.format(DATE_FORMAT).to_string(), tracker.last_id],
        )?;
        Ok(())
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    age: u32,
    gender: String,
    contact: String,
    appointment_date: String,
    appointment_time: String,
    appointment_day: String,
    assigned_doctor: String,
    medical_history: String,
    vital_signs: String,
    physical_examination: String,
    laboratory_tests: String,
    doctor_advice: String,
    follow_up: String,
    is_active: bool,
}

impl TryFrom<PatientRow> for Patient {
    type Error = StoreError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender: Gender = row.gender.parse().map_err(StoreError::Corrupt)?;
        let appointment_date = parse_date(&row.appointment_date)?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            gender,
            contact: row.contact,
            appointment_date,
            appointment_time: row.appointment_time,
            appointment_day: row.appointment_day,
            assigned_doctor: row.assigned_doctor,
            medical_history: row.medical_history,
            vital_signs: row.vital_signs,
            physical_examination: row.physical_examination,
            laboratory_tests: row.laboratory_tests,
            doctor_advice: row.doctor_advice,
            follow_up: row.follow_up,
            is_active: row.is_active,
        })
    }
}

fn parse_date(s: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| StoreError::Corrupt(format!("bad date {:?}: {}", s, e)))
}
