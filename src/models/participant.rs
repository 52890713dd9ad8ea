// src/models/participant.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::{config::IdentityMode, error::AppError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName {
    pub first_name: String,
    pub last_name: String,
}

impl FullName {
    pub fn display(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Who took an attempt.
///
/// Only the `Email` variant participates in the one-result-per-identity rule;
/// a deployment picks the variant through `IdentityMode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    NameOnly(FullName),
    Email { name: FullName, email: String },
}

impl Identity {
    pub fn name(&self) -> &FullName {
        match self {
            Identity::NameOnly(name) => name,
            Identity::Email { name, .. } => name,
        }
    }

    /// The uniqueness key, if this identity has one.
    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::NameOnly(_) => None,
            Identity::Email { email, .. } => Some(email),
        }
    }
}

/// Emails are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Names are stored and exported as plain text: blank names and angle
/// brackets are refused instead of being rewritten.
fn plain_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must_not_be_blank")
            .with_message("Name is required.".into()));
    }
    if value.contains(['<', '>']) {
        return Err(ValidationError::new("must_not_contain_markup")
            .with_message("Name must not contain '<' or '>'.".into()));
    }
    Ok(())
}

fn valid_email(value: &str) -> Result<(), ValidationError> {
    if !normalize_email(value).validate_email() {
        return Err(ValidationError::new("invalid_email"));
    }
    Ok(())
}

/// DTO for starting an attempt or saving a client-scored result.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ParticipantRequest {
    #[validate(
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters."),
        custom(function = plain_name)
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters."),
        custom(function = plain_name)
    )]
    pub last_name: String,
    #[validate(
        length(max = 254),
        custom(function = valid_email, message = "A valid email is required.")
    )]
    pub email: Option<String>,
}

impl ParticipantRequest {
    /// Validates the request and builds the identity variant this deployment uses.
    /// Names are kept as trimmed plain text. The email is neither validated
    /// nor kept in name-only mode.
    pub fn into_identity(self, mode: IdentityMode) -> Result<Identity, AppError> {
        let request = match mode {
            IdentityMode::NameOnly => ParticipantRequest { email: None, ..self },
            IdentityMode::Email => self,
        };
        request.validate()?;

        let name = FullName {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
        };

        match mode {
            IdentityMode::NameOnly => Ok(Identity::NameOnly(name)),
            IdentityMode::Email => {
                let email = request
                    .email
                    .as_deref()
                    .map(normalize_email)
                    .filter(|e| !e.is_empty())
                    .ok_or_else(|| AppError::InvalidInput("Email is required.".to_string()))?;
                Ok(Identity::Email { name, email })
            }
        }
    }
}

/// DTO for the advisory access check.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckAccessRequest {
    #[validate(custom(function = valid_email, message = "A valid email is required."))]
    pub email: String,
}
