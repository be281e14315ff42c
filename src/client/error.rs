use reqwest::StatusCode;

/// Failures seen by the front end when talking to the book API.
///
/// Only the HTTP status is interpreted; the error body is kept for display.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("book not found")]
    NotFound,
    /// No response at all: server down, DNS failure, connection refused
    #[error("unable to reach the server: {0}")]
    Unreachable(String),
    #[error("server returned {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        message: Option<String>,
    },
    #[error("unexpected response from the server: {0}")]
    Decode(String),
}

impl ClientError {
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound;
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

        ClientError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            message,
        }
    }

    /// Message shown by the detail view when loading book `id` fails
    pub fn detail_message(&self, id: &str) -> String {
        match self {
            ClientError::NotFound => format!(
                "Unable to find book with ID: {}. Please verify the book exists and try again.",
                id
            ),
            ClientError::Unreachable(_) => {
                "Unable to connect to the server. Please check if the backend is running."
                    .to_string()
            }
            ClientError::Status { reason, .. } => {
                format!("Failed to load book details. Server returned: {}", reason)
            }
            ClientError::Decode(_) => {
                "Failed to load book details. Server returned: Unknown error".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    /// Only failures before any response arrived count as unreachable
    fn from(e: reqwest::Error) -> Self {
        if is_transport_failure(&e) {
            ClientError::Unreachable(e.to_string())
        } else {
            ClientError::Decode(e.to_string())
        }
    }
}

fn is_transport_failure(e: &reqwest::Error) -> bool {
    (e.is_connect() || e.is_timeout() || e.is_request()) && !e.is_body() && !e.is_decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, ClientError::NotFound));
        assert_eq!(
            err.detail_message("42"),
            "Unable to find book with ID: 42. Please verify the book exists and try again."
        );
    }

    #[test]
    fn other_statuses_use_reason_phrase() {
        let err = ClientError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to fetch book"}"#,
        );
        match &err {
            ClientError::Status { status, message, .. } => {
                assert_eq!(*status, 500);
                assert_eq!(message.as_deref(), Some("Failed to fetch book"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.detail_message("42"),
            "Failed to load book details. Server returned: Internal Server Error"
        );
    }

    #[test]
    fn unreachable_message() {
        let err = ClientError::Unreachable("connection refused".into());
        assert_eq!(
            err.detail_message("42"),
            "Unable to connect to the server. Please check if the backend is running."
        );
    }
}
