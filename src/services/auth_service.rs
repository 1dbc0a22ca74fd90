//! Authentication service - Accounts, login and bearer token checks.
//!
//! Clients never send plaintext passwords: the `password` field is the
//! hex-encoded SHA-256 digest computed client side, validated by the
//! [`PasswordDigest`] value object and compared in constant time.

use async_trait::async_trait;
use std::sync::Arc;

use super::token_service::{client_token, TokenResponse, TokenService};
use crate::domain::{PasswordDigest, TokenUsage, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Compared against when the email is unknown so that both paths do the same work
const DUMMY_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, email: String, name: String, password: String) -> AppResult<User>;

    /// Login and return a `client` token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Resolve a bearer token to its user.
    ///
    /// Only `client` tokens are accepted, and the subject must still be a
    /// visible user.
    async fn authenticate(&self, token: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenService>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: Arc<dyn TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, email: String, name: String, password: String) -> AppResult<User> {
        let password = PasswordDigest::parse(&password)?;

        // Deleted accounts keep their email reserved
        if self.uow.users().find_by_email_with_deleted(&email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let user = self.uow.users().save(User::new(email, name, password)).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        let stored = match &user {
            Some(user) => user.password.clone(),
            None => PasswordDigest::from_stored(DUMMY_DIGEST.to_string()),
        };
        let password_valid = stored.matches(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                client_token(self.tokens.as_ref(), user.id)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.tokens.verify(token)?;
        if claims.usage != TokenUsage::Client {
            return Err(AppError::UnauthorizedTokenUsage);
        }

        self.uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
