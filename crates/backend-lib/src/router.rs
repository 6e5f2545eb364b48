// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router wiring.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/connect", get(handlers::auth::connect))
        .route("/disconnect", get(handlers::auth::disconnect))
        .route("/users", post(handlers::users::register))
        .route("/users/me", get(handlers::users::whoami))
        .route("/status", get(handlers::status::status))
        .route("/stats", get(handlers::status::stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
