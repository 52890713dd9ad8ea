// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ADMIN_PASSWORD_HEADER,
    handlers::{access, admin, quiz, results},
    state::AppState,
    utils::auth::admin_middleware,
};

/// Assembles the main application router.
///
/// * Participant routes: access check, attempts, client-scored results.
/// * Admin routes behind the shared-password middleware.
/// * Static frontend with an `index.html` fallback when `STATIC_DIR` is set.
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ADMIN_PASSWORD_HEADER),
        ]);

    let attempt_routes = Router::new()
        .route("/", post(quiz::start_attempt))
        .route("/{id}", get(quiz::get_attempt))
        .route("/{id}/answers", post(quiz::submit_answer))
        .route("/{id}/complete", post(quiz::complete_attempt));

    let admin_routes = Router::new()
        .route("/results", get(admin::list_results))
        .route("/results.csv", get(admin::export_results_csv))
        .layer(middleware::from_fn_with_state(state.clone(), admin_middleware));

    let mut router = Router::new()
        .route("/api/check-access", post(access::check_access))
        .route("/api/save-result", post(results::save_result))
        .nest("/api/attempts", attempt_routes)
        .nest("/api/admin", admin_routes);

    if let Some(dir) = &state.config.static_dir {
        let index = dir.join("index.html");
        let files = ServeDir::new(dir).not_found_service(ServeFile::new(index));
        router = router.fallback_service(files);
    }

    router
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
