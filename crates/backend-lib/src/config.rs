// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;
use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::Result;

use crate::digest::DigestAlgorithm;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Postgres connection URL for user records
    pub database_url: String,
    /// Redis connection URL for session tokens
    pub redis_url: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// Upper bound on any single store call, in seconds
    pub store_timeout_secs: u64,
    /// Password digest algorithm
    pub digest: DigestAlgorithm,
    /// Log level
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().unwrap(),
            database_url: "postgres://localhost/filedock".to_string(),
            redis_url: "redis://127.0.0.1/".to_string(),
            session_ttl_secs: 60 * 60 * 24, // 24 hours
            store_timeout_secs: 5,
            digest: DigestAlgorithm::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default locations
    pub fn load() -> Result<Settings> {
        Self::load_from("filedock.toml")
    }

    /// Load settings from a config file, overridable via `FILEDOCK_*`
    /// environment variables
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("FILEDOCK_"))
            .extract()?;

        Ok(settings)
    }
}
