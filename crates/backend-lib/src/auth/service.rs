use async_trait::async_trait;

use crate::error::AppError;
use crate::store::User;

/// The authentication state machine, evaluated per request against store
/// state. No persistent session object exists on this side; the token
/// store is the single source of truth for session validity.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user. Fields are optional so the caller can learn
    /// which one is missing; email is checked first.
    async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError>;

    /// Verify a credential pair and mint a session token
    async fn connect(&self, email: &str, password: &str) -> Result<String, AppError>;

    /// Revoke a session token. Deleting an absent key is not an error.
    async fn disconnect(&self, token: &str) -> Result<(), AppError>;

    /// Resolve a session token to the user it was issued for
    async fn identify(&self, token: &str) -> Result<User, AppError>;
}
