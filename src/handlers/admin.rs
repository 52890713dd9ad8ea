// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    store::ResultRecorder,
    utils::report::{evaluations_to_csv, export_file_name},
};

/// Lists every recorded evaluation, newest first.
/// Admin only.
pub async fn list_results(
    State(recorder): State<Arc<dyn ResultRecorder>>,
) -> Result<impl IntoResponse, AppError> {
    let evaluations = recorder.list_results().await?;
    Ok(Json(evaluations))
}

/// Downloads every recorded evaluation as a CSV attachment.
/// Admin only.
pub async fn export_results_csv(
    State(recorder): State<Arc<dyn ResultRecorder>>,
) -> Result<impl IntoResponse, AppError> {
    let evaluations = recorder.list_results().await?;
    let body = evaluations_to_csv(&evaluations)?;

    tracing::info!(rows = evaluations.len(), "Exported evaluations as CSV");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(chrono::Utc::now())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
