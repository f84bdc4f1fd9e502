use chrono::{Datelike, Months, NaiveDate};
use serde_json::{json, Value};

use shared_config::ClientConfig;

pub struct TestConfig {
    pub api_base_url: String,
    pub redirect_delay_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            redirect_delay_secs: 5,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            redirect_delay_secs: self.redirect_delay_secs,
            home_target: "index.html".to_string(),
        }
    }
}

/// A fixed "today" so calendar tests do not depend on the wall clock.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid fixed date")
}

/// First day of the month after `date`.
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .expect("next month is representable")
}

pub struct MockHospitalResponses;

impl MockHospitalResponses {
    pub fn doctor(doctor_id: i64, full_name: &str, department: &str) -> Value {
        json!({
            "doctor_id": doctor_id,
            "full_name": full_name,
            "description": format!("{} specialist", department),
            "contact_number": "9876543210",
            "email": format!("doctor{}@hospital.test", doctor_id),
            "department": department,
            "username": format!("doctor{}", doctor_id)
        })
    }

    pub fn cardiology_doctors() -> Value {
        json!([
            Self::doctor(11, "Dr. Anil Kapoor", "Cardiology"),
            Self::doctor(12, "Dr. Sunita Rao", "Cardiology"),
        ])
    }

    pub fn neurology_doctors() -> Value {
        json!([
            Self::doctor(21, "Dr. Farah Khan", "Neurology"),
        ])
    }

    pub fn booking_success(appointment_id: i64) -> Value {
        json!({
            "status": "success",
            "appointment_id": appointment_id,
            "patient_id": 501,
            "message": "Appointment booked successfully"
        })
    }

    pub fn booking_rejected(message: &str) -> Value {
        json!({
            "success": false,
            "message": message
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "error": message
        })
    }
}
