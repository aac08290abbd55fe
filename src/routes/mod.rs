pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod profile;
pub mod quiz;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware;
use crate::AppState;

/// Builds the full application router. `public_rps` feeds the fixed-window
/// rate limiter in front of both route groups.
pub fn create_router(state: AppState, public_rps: u32) -> Router {
    let open_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login));

    let session_api = Router::new()
        .route("/api/quiz/start", post(quiz::start_quiz))
        .route("/api/quiz/current", get(quiz::current_question))
        .route("/api/quiz/answer", post(quiz::submit_answer))
        .route("/api/quiz/advance", post(quiz::advance))
        .route("/api/quiz/status", get(quiz::quiz_status))
        .route("/api/quiz/finalize", post(quiz::finalize_quiz))
        .route("/api/quiz/reset", post(quiz::reset_quiz))
        .route("/api/profile", get(profile::profile))
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/api/leaderboard/me", get(leaderboard::my_rank))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    open_api
        .merge(session_api)
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(public_rps),
            middleware::rate_limit::rps_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
