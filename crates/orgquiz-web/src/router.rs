//! Axum router - maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use crate::state::SharedState;
use crate::handlers::{
    synthesis::{groups, new_problem, solution, network},
    nomenclature::{new_card, answer},
    system::health,
};

/// Build and return the full Axum router.
pub fn build_router(state: SharedState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/api/health",             get(health))

        // Synthesis quiz
        .route("/api/synthesis/groups",   get(groups))
        .route("/api/synthesis/problems", post(new_problem))
        .route("/api/synthesis/solution", post(solution))
        .route("/api/synthesis/network",  get(network))

        // Nomenclature flashcards
        .route("/api/nomenclature/cards",  post(new_card))
        .route("/api/nomenclature/answer", post(answer))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
