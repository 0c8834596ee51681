//! Waitlist signup endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Signup request body.
///
/// Fields are optional at the wire level so a missing field produces the
/// contractual 400 instead of a framework-level 422.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/waitlist - register a signup
async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let (email, username) = require_fields(&req)?;

    state.waitlist.register(email, username).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "Successfully added to waitlist",
        }),
    ))
}

/// Reject absent or empty fields before the service is invoked.
fn require_fields(req: &SignupRequest) -> Result<(&str, &str), ApiError> {
    match (req.email.as_deref(), req.username.as_deref()) {
        (Some(email), Some(username)) if !email.is_empty() && !username.is_empty() => {
            Ok((email, username))
        }
        _ => Err(ApiError::Validation {
            message: "Email and username are required".to_string(),
        }),
    }
}

/// Waitlist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/waitlist", post(join_waitlist))
}
