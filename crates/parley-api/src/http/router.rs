//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`. Middleware: CORS (permissive, the
//! browser client is served from a file:// origin), request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route("/chat", post(handlers::chat::chat))
        .route("/chat/reset", post(handlers::chat::reset_chat))
        // Feedback
        .route("/feedback/comment", post(handlers::feedback::submit_comment))
        .route("/feedback/rate", post(handlers::feedback::submit_rating))
        // History
        .route("/history", get(handlers::history::list_history))
        .route("/history/{chat_id}", get(handlers::history::session_history));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
