// src/main.rs

use evaluation_backend::config::Config;
use evaluation_backend::quiz::{attempt::AttemptRegistry, bank::QuestionBank};
use evaluation_backend::routes;
use evaluation_backend::state::AppState;
use evaluation_backend::store::SqliteRecorder;
use evaluation_backend::utils::auth::AdminSecret;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL must be a valid sqlite URL")
        .create_if_missing(true);

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to open database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    let bank = QuestionBank::from_file(&config.question_bank_path).unwrap_or_else(|e| {
        panic!("{} ({})", e, config.question_bank_path.display());
    });
    tracing::info!(
        questions = bank.len(),
        per_attempt = config.question_count,
        identity_mode = ?config.identity_mode,
        "Question bank loaded"
    );
    if bank.is_empty() {
        tracing::warn!("Question bank is empty; attempts will be rejected");
    }

    if config.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD not set, using the built-in default password");
    }
    let admin_secret = AdminSecret::from_plain(config.effective_admin_password())
        .expect("Failed to hash admin password");

    // Create AppState
    let state = AppState {
        recorder: Arc::new(SqliteRecorder::new(pool)),
        bank: Arc::new(bank),
        attempts: AttemptRegistry::new(Duration::from_secs(config.attempt_ttl_secs)),
        admin_secret,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
