// ============================
// crates/backend-lib/src/extractors.rs
// ============================
//! Axum extractors for the two authentication headers.
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::AppError;

/// Name of the session token header
pub const TOKEN_HEADER: &str = "x-token";

/// Credential pair decoded from `Authorization: Basic <b64(email:password)>`.
///
/// Any malformation (absent header, wrong scheme, undecodable payload, or a
/// payload that does not split into exactly two colon-delimited parts)
/// rejects the request; the client only ever sees `Unauthorized`.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::MalformedCredentialHeader)?;

        let encoded = header_value
            .strip_prefix("Basic ")
            .ok_or(AppError::MalformedCredentialHeader)?;

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::MalformedCredentialHeader)?;
        let decoded =
            String::from_utf8(decoded).map_err(|_| AppError::MalformedCredentialHeader)?;

        let pieces: Vec<&str> = decoded.split(':').collect();
        if pieces.len() != 2 {
            return Err(AppError::MalformedCredentialHeader);
        }

        Ok(BasicCredentials {
            email: pieces[0].to_string(),
            password: pieces[1].to_string(),
        })
    }
}

/// Session token taken from the `X-Token` header.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .ok_or(AppError::TokenNotFound)?;

        Ok(SessionToken(token.to_string()))
    }
}
