// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types.
///
/// The protected operations (connect, disconnect, whoami) collapse every
/// failure into a single `Unauthorized` response; the internal distinction
/// is kept here for logging only. Registration failures are not
/// security-sensitive and surface their own messages.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed credential header")]
    MalformedCredentialHeader,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("user not found")]
    UserNotFound,

    #[error("token not found")]
    TokenNotFound,

    #[error("invalid user id")]
    InvalidId,

    #[error("email already registered")]
    DuplicateRegistration,

    #[error("missing {0}")]
    MissingField(&'static str),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::DuplicateRegistration
            | AppError::StoreUnavailable(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get the message exposed to the client.
    ///
    /// Everything on the authenticated path renders as a bare
    /// "Unauthorized"; the reason never leaves the process.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingField(field) => format!("Missing {field}"),
            AppError::DuplicateRegistration => "Already exist".to_string(),
            AppError::StoreUnavailable(_) => "Storage unavailable".to_string(),
            _ => "Unauthorized".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The collapsed response hides the reason; keep it in the logs.
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(error = %self, "request rejected");
        } else {
            tracing::warn!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.client_message() });

        (status, axum::Json(body)).into_response()
    }
}
