use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;

use crate::auth::token::{mint_token, session_key};
use crate::auth::AuthService;
use crate::digest::{hash_password, verify_password, DigestAlgorithm};
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::{CredentialStore, TokenStore, User};

/// Default auth service over the two store facades.
pub struct DefaultAuth {
    credentials: CredentialStore,
    tokens: TokenStore,
    digest: DigestAlgorithm,
    session_ttl: Duration,
}

impl DefaultAuth {
    pub fn new(
        credentials: CredentialStore,
        tokens: TokenStore,
        digest: DigestAlgorithm,
        session_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            tokens,
            digest,
            session_ttl,
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        // Email first: when both are absent the reported field is email.
        let email = match email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(AppError::MissingField("email")),
        };
        let password = match password {
            Some(password) if !password.is_empty() => password,
            _ => return Err(AppError::MissingField("password")),
        };

        if self.credentials.exists(email).await {
            return Err(AppError::DuplicateRegistration);
        }

        // The pre-check above is not atomic with the insert; the store's
        // unique constraint catches the losing side of a race.
        let digest = hash_password(self.digest, password);
        let user = self.credentials.create(email, &digest).await?;

        counter!(keys::AUTH_REGISTERED).increment(1);
        Ok(user)
    }

    async fn connect(&self, email: &str, password: &str) -> Result<String, AppError> {
        let Some(user) = self.credentials.find_by_email(email).await else {
            counter!(keys::AUTH_CONNECT_REJECTED).increment(1);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(self.digest, &user.password_hash, password) {
            counter!(keys::AUTH_CONNECT_REJECTED).increment(1);
            return Err(AppError::InvalidCredentials);
        }

        let token = mint_token();
        if let Err(e) = self
            .tokens
            .set_with_expiry(&session_key(&token), &user.id.to_string(), self.session_ttl)
            .await
        {
            // Internal failures are hidden from the client; a login must
            // not reveal whether the credentials were right.
            tracing::warn!(error = %e, "session could not be stored");
            counter!(keys::AUTH_CONNECT_REJECTED).increment(1);
            return Err(AppError::InvalidCredentials);
        }

        counter!(keys::AUTH_CONNECT_OK).increment(1);
        Ok(token)
    }

    async fn disconnect(&self, token: &str) -> Result<(), AppError> {
        let removed = self.tokens.delete(&session_key(token)).await;
        tracing::debug!(removed, "session revoked");
        counter!(keys::AUTH_DISCONNECT).increment(1);
        Ok(())
    }

    async fn identify(&self, token: &str) -> Result<User, AppError> {
        let Some(user_id) = self.tokens.get(&session_key(token)).await else {
            counter!(keys::AUTH_IDENTIFY_REJECTED).increment(1);
            return Err(AppError::TokenNotFound);
        };

        match self.credentials.find_by_id(&user_id).await? {
            Some(user) => Ok(user),
            None => {
                counter!(keys::AUTH_IDENTIFY_REJECTED).increment(1);
                Err(AppError::UserNotFound)
            }
        }
    }
}
