// src/store/mod.rs

pub mod sqlite;

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    error::AppError,
    models::{evaluation::Evaluation, participant::Identity},
};

pub use sqlite::SqliteRecorder;

/// Outcome of the advisory identity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Allowed,
    AlreadyExists,
}

/// Score fields of a finished attempt, as persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultSummary {
    pub score: i64,
    pub total: i64,
    pub percentage: f64,
}

/// Persistence boundary for evaluation results.
///
/// `check_identity_available` is advisory only. Implementations must enforce
/// uniqueness atomically in `record_result` and report a violation as
/// `AppError::DuplicateIdentity`.
#[async_trait]
pub trait ResultRecorder: Send + Sync {
    /// Whether `email` may still submit a result.
    async fn check_identity_available(&self, email: &str) -> Result<Availability, AppError>;

    /// Persists one result. Email identities may do this at most once.
    async fn record_result(
        &self,
        identity: &Identity,
        result: &ResultSummary,
    ) -> Result<Evaluation, AppError>;

    /// All persisted results, newest first.
    async fn list_results(&self) -> Result<Vec<Evaluation>, AppError>;
}
