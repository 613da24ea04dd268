//! Subcommands, one per menu entry of the clinic front desk.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use smartcare_core::validation::to_display_time;
use smartcare_core::{Clinic, Gender, Patient, PatientDraft, ScheduleFilter};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new patient and book an appointment
    AddPatient(AddPatientArgs),

    /// List active patients
    Patients,

    /// Remove (deactivate) a patient
    Remove {
        /// Patient ID, e.g. 2026-10-19-1
        id: String,
    },

    /// List doctors
    Doctors,

    /// Search all patients by name
    Search {
        /// Case-insensitive name fragment; empty lists everyone
        #[arg(default_value = "")]
        query: String,
    },

    /// List patients awaiting follow-up
    FollowUps {
        /// Only show follow-ups for this doctor
        #[arg(long)]
        doctor: Option<String>,
    },

    /// Dismiss a patient's follow-up
    Dismiss {
        /// Patient ID
        id: String,
    },

    /// Show the appointment schedule in chronological order
    Schedule {
        /// Only this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only this doctor
        #[arg(long)]
        doctor: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AddPatientArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub age: u32,

    /// Male, Female or Other
    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub contact: String,

    /// Appointment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Appointment time in 12-hour form, e.g. "02:30 PM"
    #[arg(long, default_value = "")]
    pub time: String,

    /// Doctor display name, as listed by `doctors`
    #[arg(long)]
    pub doctor: String,

    #[arg(long, default_value = "")]
    pub medical_history: String,

    #[arg(long, default_value = "")]
    pub vital_signs: String,

    #[arg(long, default_value = "")]
    pub physical_examination: String,

    #[arg(long, default_value = "")]
    pub lab_results: String,

    /// Doctor's notes
    #[arg(long, default_value = "")]
    pub doctor_notes: String,

    /// Follow-up note; leave empty if not required
    #[arg(long, default_value = "")]
    pub follow_up: String,
}

impl From<AddPatientArgs> for PatientDraft {
    fn from(args: AddPatientArgs) -> Self {
        PatientDraft {
            name: args.name,
            age: args.age,
            gender: args.gender,
            contact: args.contact,
            appointment_date: args.date,
            appointment_time: args.time,
            doctor: args.doctor,
            medical_history: args.medical_history,
            vital_signs: args.vital_signs,
            physical_examination: args.physical_examination,
            laboratory_tests: args.lab_results,
            doctor_advice: args.doctor_notes,
            follow_up: args.follow_up,
        }
    }
}

/// Execute one command, writing its report to `out`.
pub fn run<W: Write>(clinic: &Clinic, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::AddPatient(args) => {
            let admission = clinic.submit_patient(args.into())?;
            writeln!(out, "{}", admission.message())?;
            writeln!(out, "Patient ID: {}", admission.patient.id)?;
        }
        Command::Patients => {
            let rows = clinic.roster()?;
            if rows.is_empty() {
                writeln!(out, "No registered patients.")?;
            }
            for row in rows {
                writeln!(out, "{}", row)?;
            }
        }
        Command::Remove { id } => {
            let patient = clinic
                .remove_patient(&id)
                .with_context(|| format!("could not remove patient {}", id))?;
            writeln!(out, "{} removed.", patient.name)?;
        }
        Command::Doctors => {
            for (i, doctor) in clinic.doctors()?.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, doctor.name)?;
            }
        }
        Command::Search { query } => {
            let found = clinic.search(&query)?;
            if found.is_empty() {
                writeln!(out, "No patients match \"{}\".", query)?;
            }
            for patient in &found {
                writeln!(out, "{}", summary_line(patient))?;
            }
        }
        Command::FollowUps { doctor } => {
            let due = clinic.follow_ups(doctor.as_deref())?;
            if due.is_empty() {
                writeln!(out, "No follow-ups pending.")?;
            }
            for patient in &due {
                writeln!(out, "{}", summary_line(patient))?;
                writeln!(out, "   Follow-up: {}", patient.follow_up.trim())?;
            }
        }
        Command::Dismiss { id } => {
            let patient = clinic
                .dismiss_follow_up(&id)
                .with_context(|| format!("could not dismiss follow-up for {}", id))?;
            writeln!(out, "Follow-up for {} dismissed.", patient.name)?;
        }
        Command::Schedule { date, doctor } => {
            let entries = clinic.schedule(&ScheduleFilter { date, doctor })?;
            if entries.is_empty() {
                writeln!(out, "No appointments scheduled.")?;
            }
            for patient in &entries {
                writeln!(
                    out,
                    "{} {} ({}) | {} | {} [{}]",
                    patient.appointment_date,
                    to_display_time(&patient.appointment_time),
                    patient.display_day(),
                    patient.assigned_doctor,
                    patient.name,
                    patient.display_id()
                )?;
            }
        }
    }
    Ok(())
}

fn summary_line(patient: &Patient) -> String {
    let status = if patient.is_active { "active" } else { "inactive" };
    format!(
        "{} (ID: {}) - {} on {} at {} [{}]",
        patient.name,
        patient.display_id(),
        patient.assigned_doctor,
        patient.appointment_date,
        to_display_time(&patient.appointment_time),
        status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcare_core::{FixedClock, MemoryStore};

    const DOCTOR: &str = "Dr. Kia Bannca P. Marabe, General Physician";

    fn clinic() -> Clinic {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        Clinic::new(MemoryStore::new(), FixedClock::new(today))
    }

    fn add(name: &str, time: &str, follow_up: &str) -> Command {
        Command::AddPatient(AddPatientArgs {
            name: name.into(),
            age: 8,
            gender: Gender::Other,
            contact: "09171234567".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            time: time.into(),
            doctor: DOCTOR.into(),
            medical_history: String::new(),
            vital_signs: String::new(),
            physical_examination: String::new(),
            lab_results: String::new(),
            doctor_notes: String::new(),
            follow_up: follow_up.into(),
        })
    }

    fn output(clinic: &Clinic, command: Command) -> String {
        let mut buf = Vec::new();
        run(clinic, command, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_then_list() {
        let clinic = clinic();
        let added = output(&clinic, add("Nina", "09:15 AM", ""));
        assert!(added.contains("assigned to Dr. Kia Bannca P. Marabe, General Physician on Wednesday."));
        assert!(added.contains("Patient ID: 2026-10-19-1"));

        let listed = output(&clinic, Command::Patients);
        assert!(listed.starts_with("1. Nina (ID: 2026-10-19-1)"));
        assert!(listed.contains("at 09:15 AM (Wednesday)"));
    }

    #[test]
    fn test_rejection_is_an_error() {
        let clinic = clinic();
        let mut buf = Vec::new();
        let err = run(&clinic, add("Nina", "", ""), &mut buf).unwrap_err();
        assert_eq!(err.to_string(), "Appointment time is required.");
    }

    #[test]
    fn test_follow_up_flow() {
        let clinic = clinic();
        output(&clinic, add("Nina", "09:15 AM", "Review x-ray"));

        let due = output(&clinic, Command::FollowUps { doctor: None });
        assert!(due.contains("Follow-up: Review x-ray"));

        output(&clinic, Command::Dismiss { id: "2026-10-19-1".into() });
        let due = output(&clinic, Command::FollowUps { doctor: None });
        assert_eq!(due, "No follow-ups pending.\n");
        assert!(output(&clinic, Command::Patients).contains("Nina"));
    }

    #[test]
    fn test_schedule_and_search_after_removal() {
        let clinic = clinic();
        output(&clinic, add("Late", "04:00 PM", ""));
        output(&clinic, add("Early", "08:00 AM", ""));

        let schedule = output(&clinic, Command::Schedule { date: None, doctor: None });
        let early = schedule.find("Early").unwrap();
        let late = schedule.find("Late").unwrap();
        assert!(early < late);

        output(&clinic, Command::Remove { id: "2026-10-19-1".into() });
        let schedule = output(&clinic, Command::Schedule { date: None, doctor: None });
        assert!(!schedule.contains("Late"));

        let found = output(&clinic, Command::Search { query: "late".into() });
        assert!(found.contains("[inactive]"));
    }

    #[test]
    fn test_doctors_listed() {
        let listed = output(&clinic(), Command::Doctors);
        assert_eq!(
            listed,
            "1. Dr. Kia Bannca P. Marabe, General Physician\n2. Dr. JR M., Pediatrician\n"
        );
    }
}
