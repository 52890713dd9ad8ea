// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{participant::ParticipantRequest, question::PublicQuestion},
    quiz::{attempt::Attempt, scorer::QuizResult, selector::random_questions},
    state::AppState,
    store::{Availability, ResultSummary},
};

/// DTO returned when an attempt starts. Answers are never included.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartAttemptResponse {
    pub attempt_id: Uuid,
    pub total: usize,
    pub questions: Vec<PublicQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Starts an attempt.
///
/// * Validates the identity fields for this deployment's identity mode.
/// * Rejects identities that already have a result (advisory pre-check).
/// * Draws the question set, which stays fixed for the whole attempt.
pub async fn start_attempt(
    State(state): State<AppState>,
    Json(payload): Json<ParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let identity = payload.into_identity(state.config.identity_mode)?;

    if let Some(email) = identity.email() {
        if state.recorder.check_identity_available(email).await? == Availability::AlreadyExists {
            return Err(AppError::already_completed());
        }
    }

    let questions = random_questions(state.bank.questions(), state.config.question_count);
    if questions.is_empty() {
        return Err(AppError::NotFound("No questions available".to_string()));
    }

    let public_questions: Vec<PublicQuestion> =
        questions.iter().map(PublicQuestion::from).collect();
    let total = questions.len();
    let attempt_id = state.attempts.start(Attempt::new(identity, questions)).await;

    tracing::info!(%attempt_id, total, "Attempt started");

    Ok((
        StatusCode::CREATED,
        Json(StartAttemptResponse {
            attempt_id,
            total,
            questions: public_questions,
        }),
    ))
}

/// Returns how far an attempt has progressed and its current question.
pub async fn get_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let progress = state.attempts.progress(id).await?;
    Ok(Json(progress))
}

/// Answers the current question of an attempt.
///
/// Returns the updated progress, or, after the last question, the scored
/// result once it has been recorded (201).
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Response, AppError> {
    let progress = state.attempts.submit_answer(id, &payload.answer).await?;

    if progress.current_question.is_some() {
        return Ok(Json(progress).into_response());
    }

    let result = record_completed(&state, id).await?;
    Ok((StatusCode::CREATED, Json(result)).into_response())
}

/// Records a completed attempt whose previous recording failed on storage.
pub async fn complete_attempt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let result = record_completed(&state, id).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Scores a completed attempt and hands it to the recorder.
///
/// The attempt is taken out of the registry first so it is recorded at most
/// once; it is put back only when storage failed and a retry makes sense.
async fn record_completed(state: &AppState, id: Uuid) -> Result<QuizResult, AppError> {
    let attempt = state.attempts.take_completed(id).await?;
    let result = attempt.finish()?;

    let summary = ResultSummary {
        score: result.score as i64,
        total: result.total as i64,
        percentage: result.percentage,
    };

    match state.recorder.record_result(attempt.identity(), &summary).await {
        Ok(evaluation) => {
            tracing::info!(
                evaluation_id = evaluation.id,
                score = result.score,
                total = result.total,
                "Evaluation recorded"
            );
            Ok(result)
        }
        Err(AppError::StorageUnavailable(msg)) => {
            state.attempts.restore(id, attempt).await;
            Err(AppError::StorageUnavailable(msg))
        }
        Err(e) => Err(e),
    }
}
