// libs/booking-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{BookingError, WizardStep};

/// The allowed-transition table for the booking wizard.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepLifecycle;

impl StepLifecycle {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a step transition is allowed
    pub fn validate_step_transition(
        &self,
        current: WizardStep,
        next: WizardStep,
    ) -> Result<(), BookingError> {
        debug!("Validating step transition from {} to {}", current, next);

        if !self.get_valid_transitions(current).contains(&next) {
            warn!("Invalid step transition attempted: {} -> {}", current, next);
            return Err(BookingError::InvalidStepTransition { from: current, to: next });
        }

        Ok(())
    }

    /// Get all valid next steps for a given current step
    pub fn get_valid_transitions(&self, current: WizardStep) -> Vec<WizardStep> {
        match current {
            WizardStep::SelectingDepartment => vec![
                WizardStep::SelectingDoctor,
            ],
            WizardStep::SelectingDoctor => vec![
                WizardStep::SelectingDoctor, // another department picked
                WizardStep::SelectingDateTime,
            ],
            WizardStep::SelectingDateTime => vec![
                WizardStep::SelectingDoctor,
                WizardStep::EnteringPatientDetails,
            ],
            WizardStep::EnteringPatientDetails => vec![
                WizardStep::SelectingDateTime,
                WizardStep::Submitting,
            ],
            WizardStep::Submitting => vec![
                WizardStep::Completed,
                WizardStep::Failed,
            ],
            WizardStep::Failed => vec![
                WizardStep::Submitting,
                WizardStep::SelectingDateTime,
            ],
            WizardStep::Completed => vec![],
        }
    }

    /// Where the back control leads from `current`, if anywhere.
    pub fn previous_step(&self, current: WizardStep) -> Option<WizardStep> {
        match current {
            WizardStep::SelectingDateTime => Some(WizardStep::SelectingDoctor),
            WizardStep::EnteringPatientDetails | WizardStep::Failed => Some(WizardStep::SelectingDateTime),
            _ => None,
        }
    }

    pub fn is_terminal(&self, current: WizardStep) -> bool {
        self.get_valid_transitions(current).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_forward_path_is_allowed() {
        let lifecycle = StepLifecycle::new();
        let path = [
            WizardStep::SelectingDepartment,
            WizardStep::SelectingDoctor,
            WizardStep::SelectingDateTime,
            WizardStep::EnteringPatientDetails,
            WizardStep::Submitting,
            WizardStep::Completed,
        ];

        for pair in path.windows(2) {
            assert!(lifecycle.validate_step_transition(pair[0], pair[1]).is_ok());
        }
    }

    #[test]
    fn test_skipping_steps_is_rejected() {
        let lifecycle = StepLifecycle::new();

        assert_matches!(
            lifecycle.validate_step_transition(WizardStep::SelectingDoctor, WizardStep::Submitting),
            Err(BookingError::InvalidStepTransition { from: WizardStep::SelectingDoctor, to: WizardStep::Submitting })
        );
        assert!(lifecycle
            .validate_step_transition(WizardStep::SelectingDepartment, WizardStep::SelectingDateTime)
            .is_err());
    }

    #[test]
    fn test_failed_allows_retry_and_completed_is_terminal() {
        let lifecycle = StepLifecycle::new();

        assert!(lifecycle.validate_step_transition(WizardStep::Failed, WizardStep::Submitting).is_ok());
        assert!(lifecycle.is_terminal(WizardStep::Completed));
        assert!(!lifecycle.is_terminal(WizardStep::Failed));
    }

    #[test]
    fn test_back_targets() {
        let lifecycle = StepLifecycle::new();

        assert_eq!(lifecycle.previous_step(WizardStep::SelectingDateTime), Some(WizardStep::SelectingDoctor));
        assert_eq!(lifecycle.previous_step(WizardStep::EnteringPatientDetails), Some(WizardStep::SelectingDateTime));
        assert_eq!(lifecycle.previous_step(WizardStep::Submitting), None);
    }
}
