// ============================
// crates/backend-lib/src/store/credentials.rs
// ============================
//! Persistence and retrieval of user records.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use filedock_common::PublicUser;

use crate::error::AppError;

/// User record as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public view: identifier and email, never the digest
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.to_string(),
            email: self.email.clone(),
        }
    }
}

/// Trait for user-record backends
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    /// Connection liveness probe
    async fn ping(&self) -> Result<(), AppError>;

    /// True if a user with that email is present
    async fn exists(&self, email: &str) -> Result<bool, AppError>;

    /// Insert a new record, returning it as stored.
    /// A unique-constraint violation maps to `DuplicateRegistration`.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look up a user by the external string form of its identifier.
    /// Fails with `InvalidId` if the string does not parse.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn count_users(&self) -> Result<u64, AppError>;

    async fn count_files(&self) -> Result<u64, AppError>;
}

fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId)
}

/// Postgres implementation of the credential backend.
///
/// One pool for the whole process, established at startup. Queries are
/// plain runtime-checked sqlx; uniqueness is enforced by the `users.email`
/// constraint in addition to the caller's pre-check.
#[derive(Clone)]
pub struct PgCredentialBackend {
    pool: PgPool,
}

impl PgCredentialBackend {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables this subsystem relies on.
    ///
    /// The `files` table belongs to the surrounding file-manager API; it is
    /// created empty here so `stats` works on a fresh database.
    pub async fn bootstrap_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email         TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CredentialBackend for PgCredentialBackend {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self, email: &str) -> Result<bool, AppError> {
        let present: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(present)
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicateRegistration
            }
            _ => AppError::StoreUnavailable(e.to_string()),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = parse_user_id(id)?;
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(count as u64)
    }

    async fn count_files(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(count as u64)
    }
}

/// In-memory implementation of the credential backend, used by tests and
/// local development.
#[derive(Clone, Default)]
pub struct MemoryCredentialBackend {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryCredentialBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialBackend for MemoryCredentialBackend {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.email == email))
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.email == email) {
            return Err(AppError::DuplicateRegistration);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let id = parse_user_id(id)?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn count_files(&self) -> Result<u64, AppError> {
        Ok(0)
    }
}

/// Policy adapter around a credential backend.
///
/// Liveness problems on the read path degrade to "not found"; only writes
/// raise. Every call is bounded by the configured timeout so a hung
/// connection cannot hang the request forever.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn CredentialBackend>,
    timeout: Duration,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn CredentialBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub async fn is_alive(&self) -> bool {
        matches!(
            tokio::time::timeout(self.timeout, self.backend.ping()).await,
            Ok(Ok(()))
        )
    }

    pub async fn exists(&self, email: &str) -> bool {
        match tokio::time::timeout(self.timeout, self.backend.exists(email)).await {
            Ok(Ok(present)) => present,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "credential store existence check failed");
                false
            }
            Err(_) => {
                tracing::warn!("credential store existence check timed out");
                false
            }
        }
    }

    pub async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        match tokio::time::timeout(self.timeout, self.backend.insert(email, password_hash)).await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::StoreUnavailable(
                "credential store insert timed out".to_string(),
            )),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        match tokio::time::timeout(self.timeout, self.backend.find_by_email(email)).await {
            Ok(Ok(user)) => user,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "credential store lookup failed");
                None
            }
            Err(_) => {
                tracing::warn!("credential store lookup timed out");
                None
            }
        }
    }

    /// `Err(InvalidId)` on a malformed identifier, `Ok(None)` when the user
    /// is absent or the store is unreachable.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        match tokio::time::timeout(self.timeout, self.backend.find_by_id(id)).await {
            Ok(Ok(user)) => Ok(user),
            Ok(Err(AppError::InvalidId)) => Err(AppError::InvalidId),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "credential store id lookup failed");
                Ok(None)
            }
            Err(_) => {
                tracing::warn!("credential store id lookup timed out");
                Ok(None)
            }
        }
    }

    pub async fn count_users(&self) -> u64 {
        match tokio::time::timeout(self.timeout, self.backend.count_users()).await {
            Ok(Ok(count)) => count,
            _ => 0,
        }
    }

    pub async fn count_files(&self) -> u64 {
        match tokio::time::timeout(self.timeout, self.backend.count_files()).await {
            Ok(Ok(count)) => count,
            _ => 0,
        }
    }
}
