// libs/booking-cell/src/services/submission.rs
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_api::HospitalApiClient;
use shared_models::{ApiError, error::extract_message};

use crate::models::{BookingConfirmation, BookingRequest};

pub const BOOKING_FAILED_MESSAGE: &str = "Failed to book appointment";

pub struct BookingSubmissionService {
    api: HospitalApiClient,
}

impl BookingSubmissionService {
    pub fn with_client(api: HospitalApiClient) -> Self {
        Self { api }
    }

    /// Send the assembled booking as one `POST /api/appointments`.
    pub async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiError> {
        debug!("Submitting appointment for doctor {} on {} at {}",
               request.doctor_id, request.appointment_date, request.appointment_time);

        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;

        let response: Value = self.api.request_with_fallback(
            Method::POST,
            "/api/appointments",
            Some(body),
            Some(BOOKING_FAILED_MESSAGE),
        ).await?;

        if is_rejection(&response) {
            let message = extract_message(&response).unwrap_or_else(|| BOOKING_FAILED_MESSAGE.to_string());
            warn!("Server rejected booking: {}", message);
            return Err(ApiError::Rejected(message));
        }

        // The server answered 2xx, so the appointment may exist even when the
        // body cannot be read as a confirmation.
        let confirmation: BookingConfirmation = serde_json::from_value(response).map_err(|e| {
            warn!("Booking accepted without a readable confirmation: {}", e);
            ApiError::Unconfirmed(e.to_string())
        })?;

        info!("Appointment {} booked", confirmation.appointment_id);
        Ok(confirmation)
    }
}

/// A 2xx body can still carry a refusal: `success: false` or `status: "error"`.
fn is_rejection(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
        || body.get("status").and_then(Value::as_str) == Some("error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejection_markers() {
        assert!(is_rejection(&json!({"success": false, "message": "Slot unavailable"})));
        assert!(is_rejection(&json!({"status": "error"})));
        assert!(!is_rejection(&json!({"status": "success", "appointment_id": 4})));
        assert!(!is_rejection(&json!({"success": true, "appointment_id": 4})));
    }
}
