// src/utils/auth.rs

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{config::ADMIN_PASSWORD_HEADER, error::AppError};

/// The shared admin password, kept only as an Argon2 hash.
#[derive(Debug, Clone)]
pub struct AdminSecret {
    hash: Arc<str>,
}

impl AdminSecret {
    /// Hashes the plain secret. Called once at startup.
    pub fn from_plain(password: &str) -> Result<Self, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?
            .to_string();

        Ok(Self { hash: hash.into() })
    }

    /// Whether `candidate` is the admin password.
    pub fn verify(&self, candidate: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(&self.hash)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Axum Middleware: Admin Authorization.
///
/// Checks the `x-admin-password` header against the stored hash.
/// Missing or wrong secrets get 401 before the handler runs, so no data leaks.
pub async fn admin_middleware(
    State(secret): State<AdminSecret>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if provided.is_empty() || !secret.verify(provided)? {
        tracing::warn!("Rejected admin request with missing or wrong password");
        return Err(AppError::AuthRejected("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}
