use serde_json::Value;
use thiserror::Error;

pub const UNCONFIRMED_MESSAGE: &str =
    "Booking status unknown, check your appointments before booking again";

/// Failures talking to the hospital API, normalized so every step can show
/// the user one line of text and offer a retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedShape(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The server accepted the request but its reply did not confirm the
    /// outcome.
    #[error("Unconfirmed response: {0}")]
    Unconfirmed(String),
}

impl ApiError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(msg) => format!("Network error: {}", msg),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::UnexpectedShape(_) => "Invalid data format received from server".to_string(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Unconfirmed(_) => UNCONFIRMED_MESSAGE.to_string(),
        }
    }

    /// Builds a `Status` error from a non-2xx response body, preferring the
    /// body's `message` field, then `error`, then `fallback`.
    pub fn from_status_body(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_message(&value))
            .unwrap_or_else(|| fallback.to_string());

        ApiError::Status { status, message }
    }
}

/// Pulls a human readable message out of a JSON error body.
pub fn extract_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|field| match field {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Object(_) => field
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_prefers_message_field() {
        let err = ApiError::from_status_body(
            409,
            r#"{"message": "Slot unavailable", "error": "conflict"}"#,
            "Failed to book appointment",
        );
        assert_eq!(err.user_message(), "Slot unavailable");
    }

    #[test]
    fn test_status_body_falls_back_to_error_field() {
        let err = ApiError::from_status_body(500, r#"{"error": "Database error"}"#, "fallback");
        assert_eq!(err, ApiError::Status { status: 500, message: "Database error".to_string() });
    }

    #[test]
    fn test_non_json_body_uses_fallback() {
        let err = ApiError::from_status_body(502, "<html>Bad Gateway</html>", "Failed to book appointment");
        assert_eq!(err.user_message(), "Failed to book appointment");
    }

    #[test]
    fn test_unconfirmed_warns_about_possible_booking() {
        let err = ApiError::Unconfirmed("missing field `appointment_id`".to_string());
        assert_eq!(err.user_message(), UNCONFIRMED_MESSAGE);
    }

    #[test]
    fn test_nested_error_object() {
        let body = serde_json::json!({"error": {"message": "Doctor not found", "code": "404"}});
        assert_eq!(extract_message(&body), Some("Doctor not found".to_string()));
    }
}
