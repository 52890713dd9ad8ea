// src/handlers/access.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::IdentityMode,
    error::AppError,
    models::participant::{CheckAccessRequest, normalize_email},
    state::AppState,
    store::Availability,
};

/// Advisory check run before a participant starts answering.
///
/// Only saves the participant from answering a quiz they cannot submit;
/// the store still enforces uniqueness when the result is recorded.
pub async fn check_access(
    State(state): State<AppState>,
    Json(payload): Json<CheckAccessRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.config.identity_mode == IdentityMode::NameOnly {
        return Ok(Json(json!({ "allowed": true })));
    }

    payload.validate()?;
    let email = normalize_email(&payload.email);

    match state.recorder.check_identity_available(&email).await? {
        Availability::Allowed => Ok(Json(json!({ "allowed": true }))),
        Availability::AlreadyExists => Err(AppError::already_completed()),
    }
}
