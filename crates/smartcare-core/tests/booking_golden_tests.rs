//! Golden tests for booking validation.
//!
//! Each case is one registration form submitted against an empty registry.

use chrono::NaiveDate;
use smartcare_core::booking::{validate_booking, PatientDraft, Rejection};
use smartcare_core::models::{Doctor, Gender};

const DOCTOR: &str = "Dr. JR M., Pediatrician";

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    name: &'static str,
    contact: &'static str,
    time: &'static str,
    expected: Result<&'static str, Rejection>,
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "afternoon",
            name: "Maria Clara",
            contact: "09171234567",
            time: "02:30 PM",
            expected: Ok("14:30"),
        },
        GoldenCase {
            id: "midnight",
            name: "Jose Rizal",
            contact: "+639171234567",
            time: "12:00 AM",
            expected: Ok("00:00"),
        },
        GoldenCase {
            id: "noon",
            name: "O'Brien-Smith",
            contact: "1234567",
            time: "12:00 PM",
            expected: Ok("12:00"),
        },
        GoldenCase {
            id: "lowercase-meridiem",
            name: "Ana",
            contact: "1234567",
            time: "07:05 pm",
            expected: Ok("19:05"),
        },
        GoldenCase {
            id: "fifteen-digits",
            name: "Ana",
            contact: "+123456789012345",
            time: "09:00 AM",
            expected: Ok("09:00"),
        },
        GoldenCase {
            id: "single-digit-hour",
            name: "Ana",
            contact: "1234567",
            time: "2:30 PM",
            expected: Ok("14:30"),
        },
        GoldenCase {
            id: "single-digit-minute",
            name: "Ana",
            contact: "1234567",
            time: "2:5 PM",
            expected: Ok("14:05"),
        },
        GoldenCase {
            id: "digit-in-name",
            name: "J0hn",
            contact: "1234567",
            time: "09:00 AM",
            expected: Err(Rejection::InvalidName),
        },
        GoldenCase {
            id: "blank-name",
            name: "   ",
            contact: "1234567",
            time: "09:00 AM",
            expected: Err(Rejection::InvalidName),
        },
        GoldenCase {
            id: "six-digits",
            name: "Ana",
            contact: "123456",
            time: "09:00 AM",
            expected: Err(Rejection::InvalidContact),
        },
        GoldenCase {
            id: "sixteen-digits",
            name: "Ana",
            contact: "1234567890123456",
            time: "09:00 AM",
            expected: Err(Rejection::InvalidContact),
        },
        GoldenCase {
            id: "dashes-in-contact",
            name: "Ana",
            contact: "0917-123-4567",
            time: "09:00 AM",
            expected: Err(Rejection::InvalidContact),
        },
        GoldenCase {
            id: "blank-time",
            name: "Ana",
            contact: "1234567",
            time: "",
            expected: Err(Rejection::MissingTime),
        },
        GoldenCase {
            id: "24-hour-time",
            name: "Ana",
            contact: "1234567",
            time: "14:30",
            expected: Err(Rejection::UnparseableTime),
        },
        GoldenCase {
            id: "no-meridiem",
            name: "Ana",
            contact: "1234567",
            time: "02:30",
            expected: Err(Rejection::UnparseableTime),
        },
        GoldenCase {
            id: "meridiem-without-space",
            name: "Ana",
            contact: "1234567",
            time: "02:30PM",
            expected: Err(Rejection::UnparseableTime),
        },
    ]
}

#[test]
fn test_golden_cases() {
    let doctors = Doctor::defaults();
    let date = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();

    for case in get_golden_cases() {
        let draft = PatientDraft::new(
            case.name,
            30,
            Gender::Female,
            case.contact,
            date,
            case.time,
            DOCTOR,
        );
        let result = validate_booking(draft, &[], &doctors, today());

        match (&result, &case.expected) {
            (Ok(booking), Ok(time)) => assert_eq!(
                booking.appointment_time(),
                *time,
                "Case {}: stored time mismatch",
                case.id
            ),
            (Err(got), Err(expected)) => {
                assert_eq!(got, expected, "Case {}: wrong rejection", case.id)
            }
            _ => panic!(
                "Case {}: expected {:?}, got {:?}",
                case.id, case.expected, result
            ),
        }
    }
}

#[test]
fn test_rejection_messages() {
    let messages = vec![
        (
            Rejection::InvalidName,
            "Name must only contain letters, spaces, hyphens, or apostrophes.",
        ),
        (
            Rejection::InvalidContact,
            "Contact number must be digits or start with +, 7 to 15 characters.",
        ),
        (Rejection::MissingTime, "Appointment time is required."),
        (
            Rejection::UnparseableTime,
            "Time must be in 12-hour format like 02:30 PM.",
        ),
        (
            Rejection::DoubleBooked,
            "This doctor already has an appointment at the selected date and time.",
        ),
    ];

    for (rejection, expected) in messages {
        assert_eq!(rejection.to_string(), expected);
    }
}
