// src/models/evaluation.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::participant::ParticipantRequest;

/// Represents the 'evaluations' table in the database.
/// One row per completed attempt; `email` is unique when present.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for a result scored on the client and submitted in one request.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveResultRequest {
    /// Validated by `ParticipantRequest::into_identity` for the deployment's identity mode.
    #[serde(flatten)]
    pub participant: ParticipantRequest,

    #[validate(range(min = 0))]
    pub score: i64,

    #[validate(range(min = 0))]
    pub total: i64,

    /// Accepted for compatibility; the stored value is recomputed from score and total.
    pub percentage: Option<f64>,
}
