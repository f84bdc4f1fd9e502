// libs/booking-cell/src/services/validation.rs
use regex::Regex;
use tracing::debug;

use crate::models::{BookingError, FormIssue, PatientForm};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const CONTACT_PATTERN: &str = r"^\+?[0-9][0-9 \-]{5,}$";

pub struct PatientFormValidator {
    email: Regex,
    contact: Regex,
}

impl Default for PatientFormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientFormValidator {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("email pattern compiles"),
            contact: Regex::new(CONTACT_PATTERN).expect("contact pattern compiles"),
        }
    }

    /// Collects every problem with the form instead of stopping at the first.
    pub fn issues(&self, form: &PatientForm) -> Vec<FormIssue> {
        let mut issues = Vec::new();

        if form.full_name.trim().is_empty() {
            issues.push(FormIssue::Missing("full name"));
        }

        let contact = form.contact_number.trim();
        if contact.is_empty() {
            issues.push(FormIssue::Missing("contact number"));
        } else if !self.contact.is_match(contact) {
            issues.push(FormIssue::InvalidContactNumber);
        }

        let email = form.email.trim();
        if email.is_empty() {
            issues.push(FormIssue::Missing("email"));
        } else if !self.email.is_match(email) {
            issues.push(FormIssue::InvalidEmail);
        }

        if form.gender.is_none() {
            issues.push(FormIssue::Missing("gender"));
        }

        issues
    }

    pub fn validate(&self, form: &PatientForm) -> Result<(), BookingError> {
        let issues = self.issues(form);
        if issues.is_empty() {
            return Ok(());
        }

        debug!("Patient form rejected with {} issue(s)", issues.len());
        Err(BookingError::InvalidPatientForm(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn complete_form() -> PatientForm {
        PatientForm {
            full_name: "Ravi Kumar".to_string(),
            contact_number: "+91 98765 43210".to_string(),
            email: "ravi@example.com".to_string(),
            gender: Some(Gender::Male),
            ..PatientForm::default()
        }
    }

    #[test]
    fn test_complete_form_passes() {
        assert!(PatientFormValidator::new().validate(&complete_form()).is_ok());
    }

    #[test]
    fn test_empty_form_reports_all_required_fields() {
        let issues = PatientFormValidator::new().issues(&PatientForm::default());

        assert_eq!(issues, vec![
            FormIssue::Missing("full name"),
            FormIssue::Missing("contact number"),
            FormIssue::Missing("email"),
            FormIssue::Missing("gender"),
        ]);
    }

    #[test]
    fn test_malformed_email_and_contact() {
        let form = PatientForm {
            email: "ravi.example.com".to_string(),
            contact_number: "call me".to_string(),
            ..complete_form()
        };

        let issues = PatientFormValidator::new().issues(&form);
        assert_eq!(issues, vec![FormIssue::InvalidContactNumber, FormIssue::InvalidEmail]);
    }
}
