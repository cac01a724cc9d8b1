pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interpreter::handlers as interpreter_handlers;
use crate::matching::handlers as matching_handlers;
use crate::recommender::handlers as recommender_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume Interpreter
        .route(
            "/api/v1/resume/parse",
            post(interpreter_handlers::handle_parse_resume),
        )
        // Job Match Scorer
        .route("/api/v1/matches", post(matching_handlers::handle_match_jobs))
        // Skill Recommender
        .route(
            "/api/v1/recommendations/:user_id",
            get(recommender_handlers::handle_recommendations),
        )
        .route(
            "/api/v1/insights/:user_id",
            get(recommender_handlers::handle_insights),
        )
        .with_state(state)
}
