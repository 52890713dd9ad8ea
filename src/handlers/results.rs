// src/handlers/results.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::evaluation::SaveResultRequest,
    quiz::scorer::percentage,
    state::AppState,
    store::ResultSummary,
};

/// Saves a result that was scored by the client.
///
/// The stored percentage is always recomputed from `score` and `total`.
/// A second submission for the same email yields 403.
pub async fn save_result(
    State(state): State<AppState>,
    Json(payload): Json<SaveResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.score > payload.total {
        return Err(AppError::InvalidInput(
            "Score cannot exceed the number of questions.".to_string(),
        ));
    }

    let summary = ResultSummary {
        score: payload.score,
        total: payload.total,
        percentage: percentage(payload.score as usize, payload.total as usize),
    };

    if let Some(claimed) = payload.percentage {
        if (claimed - summary.percentage).abs() > 0.05 {
            tracing::warn!(
                claimed,
                computed = summary.percentage,
                "Client percentage disagrees with score/total"
            );
        }
    }

    let identity = payload.participant.into_identity(state.config.identity_mode)?;
    let evaluation = state.recorder.record_result(&identity, &summary).await?;

    tracing::info!(evaluation_id = evaluation.id, "Client-scored evaluation recorded");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": evaluation.id })),
    ))
}
