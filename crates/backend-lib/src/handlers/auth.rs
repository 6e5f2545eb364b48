// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Session handlers: login and logout.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use filedock_common::TokenResponse;

use crate::error::AppError;
use crate::extractors::{BasicCredentials, SessionToken};
use crate::AppState;

/// GET /connect
///
/// Verify the Basic credential pair and mint a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    credentials: BasicCredentials,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .auth
        .connect(&credentials.email, &credentials.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect
///
/// Revoke the presented session token; 204 with no body on success.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Result<StatusCode, AppError> {
    state.auth.disconnect(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
