// libs/booking-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use doctor_cell::Doctor;

// ==============================================================================
// WIZARD STEPS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingDepartment,
    SelectingDoctor,
    SelectingDateTime,
    EnteringPatientDetails,
    Submitting,
    Completed,
    Failed,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::SelectingDepartment => write!(f, "selecting_department"),
            WizardStep::SelectingDoctor => write!(f, "selecting_doctor"),
            WizardStep::SelectingDateTime => write!(f, "selecting_date_time"),
            WizardStep::EnteringPatientDetails => write!(f, "entering_patient_details"),
            WizardStep::Submitting => write!(f, "submitting"),
            WizardStep::Completed => write!(f, "completed"),
            WizardStep::Failed => write!(f, "failed"),
        }
    }
}

// ==============================================================================
// SCHEDULING VALUES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
}

/// One fixed half-hour slot label offered for booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    pub fn new(start: NaiveTime) -> Self {
        Self(start)
    }

    pub fn start(&self) -> NaiveTime {
        self.0
    }

    /// Label in the form the server stores, e.g. "09:30 AM".
    pub fn label(&self) -> String {
        self.0.format("%I:%M %p").to_string()
    }

    /// Parses "09:30 AM", "9:30 am" or 24-hour "14:00".
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_uppercase();
        NaiveTime::parse_from_str(&normalized, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M"))
            .ok()
            .map(Self)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

// ==============================================================================
// PATIENT FORM
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            "o" | "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

/// Identity and contact details typed on the final step, plus the visit
/// description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientForm {
    pub full_name: String,
    pub contact_number: String,
    pub email: String,
    pub adhar: String,
    pub gender: Option<Gender>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIssue {
    Missing(&'static str),
    InvalidEmail,
    InvalidContactNumber,
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormIssue::Missing(field) => write!(f, "{} is required", field),
            FormIssue::InvalidEmail => write!(f, "email address is not valid"),
            FormIssue::InvalidContactNumber => write!(f, "contact number must contain only digits, spaces, + or -"),
        }
    }
}

// ==============================================================================
// DRAFT
// ==============================================================================

/// Selections accumulated over one booking session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftAppointment {
    pub selected_doctor: Option<Doctor>,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<TimeSlot>,
    pub patient: Option<PatientForm>,
}

impl DraftAppointment {
    pub fn has_date_and_time(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }

    /// Doctor, date and time, once all three are chosen.
    pub fn selections(&self) -> Option<(&Doctor, NaiveDate, TimeSlot)> {
        Some((self.selected_doctor.as_ref()?, self.selected_date?, self.selected_time?))
    }
}

/// Running review panel shown next to every step.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentSummary {
    pub doctor: Option<String>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

impl From<&DraftAppointment> for AppointmentSummary {
    fn from(draft: &DraftAppointment) -> Self {
        Self {
            doctor: draft.selected_doctor.as_ref().map(|d| d.display_name().to_string()),
            department: draft.selected_doctor.as_ref().map(|d| d.display_department().to_string()),
            date: draft.selected_date,
            time: draft.selected_time,
        }
    }
}

impl fmt::Display for AppointmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNSET: &str = "-";
        writeln!(f, "Doctor:     {}", self.doctor.as_deref().unwrap_or(UNSET))?;
        writeln!(f, "Department: {}", self.department.as_deref().unwrap_or(UNSET))?;
        match self.date {
            Some(date) => writeln!(f, "Date:       {}", date.format("%-m/%-d/%Y"))?,
            None => writeln!(f, "Date:       {}", UNSET)?,
        }
        match self.time {
            Some(time) => write!(f, "Time:       {}", time),
            None => write!(f, "Time:       {}", UNSET),
        }
    }
}

// ==============================================================================
// WIRE TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientPayload {
    pub full_name: String,
    pub contact_number: String,
    pub email: String,
    pub adhar: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

/// Body of `POST /api/appointments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub doctor_id: i64,
    pub appointment_date: String,
    pub appointment_time: TimeSlot,
    pub description: String,
    pub patient: PatientPayload,
}

impl BookingRequest {
    pub fn new(doctor: &Doctor, date: NaiveDate, time: TimeSlot, form: &PatientForm) -> Self {
        Self {
            doctor_id: doctor.id,
            appointment_date: date.format("%Y-%m-%d").to_string(),
            appointment_time: time,
            description: form.description.trim().to_string(),
            patient: PatientPayload {
                full_name: form.full_name.trim().to_string(),
                contact_number: form.contact_number.trim().to_string(),
                email: form.email.trim().to_string(),
                adhar: form.adhar.trim().to_string(),
                gender: form.gender.map(|g| g.to_string()).unwrap_or_default(),
                address: form.address.trim().to_string(),
                city: form.city.trim().to_string(),
                state: form.state.trim().to_string(),
                pin_code: form.pin_code.trim().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Display for BookingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking Successful!")?;
        writeln!(f, "Your appointment has been confirmed.")?;
        write!(f, "Appointment ID: {}", self.appointment_id)
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Please select both date and time")]
    IncompleteDateTime,

    #[error("Please complete all selections")]
    IncompleteSelection,

    #[error("Please select a date first")]
    DateRequired,

    #[error("{0} is in the past and cannot be booked")]
    PastDate(NaiveDate),

    #[error("Cannot move from {from} to {to}")]
    InvalidStepTransition { from: WizardStep, to: WizardStep },

    #[error("Event is not available while {0}")]
    UnavailableInStep(WizardStep),

    #[error("Doctor {0} is not in the current list")]
    DoctorNotListed(i64),

    #[error("{0} is not an offered time slot")]
    UnknownTimeSlot(String),

    #[error("Please select a department")]
    DepartmentRequired,

    #[error("Nothing to retry")]
    NothingToRetry,

    #[error("Please correct the form: {}", format_issues(.0))]
    InvalidPatientForm(Vec<FormIssue>),

    #[error("A booking request is already in flight")]
    SubmissionInFlight,
}

fn format_issues(issues: &[FormIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_labels_are_zero_padded_twelve_hour() {
        let slot = TimeSlot::new(NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(slot.label(), "02:30 PM");
        assert_eq!(serde_json::to_value(slot).unwrap(), serde_json::json!("02:30 PM"));
    }

    #[test]
    fn test_time_slot_parse_accepts_both_clocks() {
        let expected = TimeSlot::new(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(TimeSlot::parse("09:30 AM"), Some(expected));
        assert_eq!(TimeSlot::parse("9:30 am"), Some(expected));
        assert_eq!(TimeSlot::parse("09:30"), Some(expected));
        assert_eq!(TimeSlot::parse("half past nine"), None);
    }

    #[test]
    fn test_summary_renders_placeholders() {
        let summary = AppointmentSummary::from(&DraftAppointment::default());
        let text = summary.to_string();
        assert!(text.contains("Doctor:     -"));
        assert!(text.contains("Time:       -"));
    }

    #[test]
    fn test_selections_need_doctor_date_and_time() {
        let mut draft = DraftAppointment {
            selected_date: NaiveDate::from_ymd_opt(2026, 10, 19),
            selected_time: TimeSlot::parse("10:30 AM"),
            ..DraftAppointment::default()
        };
        assert!(draft.has_date_and_time());
        assert!(draft.selections().is_none());

        draft.selected_doctor = Some(Doctor { id: 12, ..Doctor::default() });
        let (doctor, date, time) = draft.selections().unwrap();
        assert_eq!(doctor.id, 12);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(time.label(), "10:30 AM");
    }

    #[test]
    fn test_form_error_lists_every_issue() {
        let err = BookingError::InvalidPatientForm(vec![
            FormIssue::Missing("full name"),
            FormIssue::InvalidEmail,
        ]);
        assert_eq!(
            err.to_string(),
            "Please correct the form: full name is required; email address is not valid"
        );
    }
}
