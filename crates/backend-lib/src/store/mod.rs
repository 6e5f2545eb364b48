// crates/backend-lib/src/store/mod.rs

//! Store facades for the two external databases.
//!
//! Each store is split in two layers: a backend trait speaking the native
//! driver and returning errors, and a policy adapter that maps connectivity
//! failures to the documented sentinel outcomes (reads degrade to
//! "not found", deletes to 0) and bounds every call with a timeout. The
//! auth service only ever sees the adapters.

pub mod credentials;
pub mod tokens;

pub use credentials::{
    CredentialBackend, CredentialStore, MemoryCredentialBackend, PgCredentialBackend, User,
};
pub use tokens::{MemoryTokenBackend, RedisTokenBackend, TokenBackend, TokenStore};
