// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! User handlers: registration and identity resolution.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use filedock_common::{PublicUser, RegisterRequest};

use crate::error::AppError;
use crate::extractors::SessionToken;
use crate::AppState;

/// POST /users
///
/// Register a new user; 201 with the public view on success.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .auth
        .register(request.email.as_deref(), request.password.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(user.public())))
}

/// GET /users/me
///
/// Resolve the session token to its user; id and email only.
pub async fn whoami(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Result<Json<PublicUser>, AppError> {
    let user = state.auth.identify(&token).await?;
    Ok(Json(user.public()))
}
