use serde::{Deserialize, Serialize};
use std::fmt;

/// Departments offered as selection cards on the booking page.
pub const DEPARTMENTS: [&str; 7] = [
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Dermatology",
    "Ophthalmology",
    "General Medicine",
];

/// Snapshot of a doctor as served by `GET /api/doctors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "doctor_id", alias = "id")]
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Doctor {
    pub fn display_name(&self) -> &str {
        non_blank(&self.full_name).unwrap_or("Unknown Doctor")
    }

    pub fn display_department(&self) -> &str {
        non_blank(&self.department).unwrap_or("No Department")
    }

    pub fn display_description(&self) -> &str {
        non_blank(&self.description).unwrap_or("No description available")
    }

    pub fn display_contact(&self) -> &str {
        non_blank(&self.contact_number).unwrap_or("N/A")
    }

    pub fn display_email(&self) -> &str {
        non_blank(&self.email).unwrap_or("N/A")
    }
}

/// Text rendering of a doctor selection card.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorCard<'a> {
    pub doctor: &'a Doctor,
}

impl fmt::Display for DoctorCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} ({})", self.doctor.id, self.doctor.display_name(), self.doctor.display_department())?;
        writeln!(f, "    {}", self.doctor.display_description())?;
        write!(f, "    Phone: {}  Email: {}", self.doctor.display_contact(), self.doctor.display_email())
    }
}

/// Resolves user input to a catalogue department, case-insensitively.
/// Unknown names are passed through trimmed so ad-hoc departments still work.
pub fn normalize_department(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let known = DEPARTMENTS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
        .map(|name| name.to_string());

    Some(known.unwrap_or_else(|| trimmed.to_string()))
}
