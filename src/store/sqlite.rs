// src/store/sqlite.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{evaluation::Evaluation, participant::Identity},
};

use super::{Availability, ResultRecorder, ResultSummary};

/// `ResultRecorder` backed by the `evaluations` table.
/// The `UNIQUE` constraint on `email` is what makes recording single-shot.
#[derive(Debug, Clone)]
pub struct SqliteRecorder {
    pool: SqlitePool,
}

impl SqliteRecorder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[async_trait]
impl ResultRecorder for SqliteRecorder {
    async fn check_identity_available(&self, email: &str) -> Result<Availability, AppError> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM evaluations WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check identity availability: {:?}", e);
                    AppError::from(e)
                })?;

        Ok(match existing {
            Some(_) => Availability::AlreadyExists,
            None => Availability::Allowed,
        })
    }

    async fn record_result(
        &self,
        identity: &Identity,
        result: &ResultSummary,
    ) -> Result<Evaluation, AppError> {
        let name = identity.name();

        sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations
                (first_name, last_name, email, score, total, percentage, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, email, score, total, percentage, created_at
            "#,
        )
        .bind(&name.first_name)
        .bind(&name.last_name)
        .bind(identity.email())
        .bind(result.score)
        .bind(result.total)
        .bind(result.percentage)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_completed()
            } else {
                tracing::error!("Failed to record evaluation: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn list_results(&self) -> Result<Vec<Evaluation>, AppError> {
        sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT id, first_name, last_name, email, score, total, percentage, created_at
            FROM evaluations
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list evaluations: {:?}", e);
            AppError::from(e)
        })
    }
}
