// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the `filedock` backend and its HTTP clients.
//! This module defines the JSON bodies of the auth and user endpoints.

use serde::{Deserialize, Serialize};

/// Public view of a user: identifier and email only.
/// The password digest is never part of this type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    /// External string form of the store-assigned identifier
    pub id: String,
    pub email: String,
}

/// Body of `POST /users`
/// # Fields
/// * `email` - address to register (unique)
/// * `password` - plaintext password, digested server-side
///
/// Both fields are optional so the handler can report which one is missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful response of `GET /connect`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body shared by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: String,
}

/// Response of `GET /status`: liveness of the two backing stores
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusResponse {
    pub redis: bool,
    pub db: bool,
}

/// Response of `GET /stats`: row counts of the file-manager collections
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatsResponse {
    pub users: u64,
    pub files: u64,
}
