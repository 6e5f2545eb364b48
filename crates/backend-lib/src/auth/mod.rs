// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod token;
mod service;
mod service_impl;

pub use token::{mint_token, session_key, SESSION_KEY_PREFIX};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
