// ============================
// crates/backend-lib/src/handlers/status.rs
// ============================
//! Store liveness and collection counts.
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use filedock_common::{StatsResponse, StatusResponse};

use crate::AppState;

/// GET /status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        redis: state.tokens.is_alive().await,
        db: state.credentials.is_alive().await,
    })
}

/// GET /stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        users: state.credentials.count_users().await,
        files: state.credentials.count_files().await,
    })
}
