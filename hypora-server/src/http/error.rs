//! API error type with IntoResponse
//!
//! Errors are converted to JSON bodies of the form `{"error": <message>}`
//! with the status code the signup form expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::waitlist::WaitlistError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or empty request field (400)
    Validation { message: String },

    /// Email already on the waitlist (409)
    Duplicate,

    /// Database unreachable or budget exceeded (503)
    Unavailable { message: String },

    /// Anything else (500, logged)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation { message } => (StatusCode::BAD_REQUEST, message),
            Self::Duplicate => (
                StatusCode::CONFLICT,
                "This email is already on the waitlist".to_string(),
            ),
            Self::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<WaitlistError> for ApiError {
    fn from(e: WaitlistError) -> Self {
        match e {
            WaitlistError::Validation(source) => Self::Validation {
                message: source.to_string(),
            },
            WaitlistError::DuplicateEmail => Self::Duplicate,
            err @ (WaitlistError::Timeout { .. } | WaitlistError::Connection { .. }) => {
                Self::Unavailable {
                    message: err.to_string(),
                }
            }
            WaitlistError::Unknown { message } => Self::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(WaitlistError::Validation(ValidationError::Empty {
            field: "email",
        }));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_is_409_with_message() {
        let response = ApiError::from(WaitlistError::DuplicateEmail).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "This email is already on the waitlist");
    }

    #[tokio::test]
    async fn timeout_is_503() {
        let err = ApiError::from(WaitlistError::Timeout { seconds: 8 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn connection_failure_is_503() {
        let err = ApiError::from(WaitlistError::Connection {
            message: "database connect failed".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_is_500_with_original_message() {
        let err = ApiError::from(WaitlistError::Unknown {
            message: "replication lag".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "replication lag");
    }
}
