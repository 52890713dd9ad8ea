// src/config.rs

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

/// Number of questions drawn for an attempt when `QUIZ_QUESTION_COUNT` is unset.
pub const DEFAULT_QUESTION_COUNT: usize = 30;

/// Fallback admin password, used only when `ADMIN_PASSWORD` is unset.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Header carrying the shared admin secret.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// How participants are identified in this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// First name, last name and email. One result per email.
    Email,
    /// First name and last name only. No uniqueness is enforced.
    NameOnly,
}

impl FromStr for IdentityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(IdentityMode::Email),
            "name-only" | "name_only" | "name" => Ok(IdentityMode::NameOnly),
            other => Err(format!("unknown identity mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_password: Option<String>,
    pub question_bank_path: PathBuf,
    pub question_count: usize,
    pub identity_mode: IdentityMode,
    pub static_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub attempt_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://database.sqlite".to_string());

        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());

        let question_bank_path = env::var("QUESTION_BANK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/questions.json"));

        let question_count = env::var("QUIZ_QUESTION_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_QUESTION_COUNT);

        let identity_mode = env::var("IDENTITY_MODE")
            .map(|v| v.parse().expect("IDENTITY_MODE must be 'email' or 'name-only'"))
            .unwrap_or(IdentityMode::Email);

        let static_dir = env::var("STATIC_DIR").ok().map(PathBuf::from);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3001".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let attempt_ttl_secs = env::var("ATTEMPT_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7200);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            admin_password,
            question_bank_path,
            question_count,
            identity_mode,
            static_dir,
            cors_origins,
            attempt_ttl_secs,
            port,
            rust_log,
        }
    }

    /// The admin password in effect, falling back to the built-in default.
    pub fn effective_admin_password(&self) -> &str {
        self.admin_password.as_deref().unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identity_modes() {
        assert_eq!("email".parse::<IdentityMode>(), Ok(IdentityMode::Email));
        assert_eq!(" Name-Only ".parse::<IdentityMode>(), Ok(IdentityMode::NameOnly));
        assert!("phone".parse::<IdentityMode>().is_err());
    }
}
