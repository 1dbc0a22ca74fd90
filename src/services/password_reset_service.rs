//! Password reset service.
//!
//! Two steps: `request_reset` mails a short-lived `resetPassword` token to
//! the account owner, and `reset_password` trades that token plus a new
//! password digest for a regular `client` token.

use async_trait::async_trait;
use std::sync::Arc;

use super::token_service::{client_token, TokenResponse, TokenService};
use crate::config::{Config, PASSWORD_RESET_SUBJECT};
use crate::domain::{PasswordDigest, TokenUsage, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{MailData, Mailer, UnitOfWork};

/// Input of the reset step
#[derive(Debug, Clone)]
pub struct ResetPassword {
    pub token: String,
    /// Hex SHA-256 digest computed by the client
    pub new_password: String,
}

/// Sender and link settings for reset emails
#[derive(Debug, Clone)]
pub struct ResetMailSettings {
    pub from: String,
    /// Page the emailed link points to; the token is appended as `?token=`
    pub reset_url: String,
}

impl ResetMailSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            from: config.mail_from.clone(),
            reset_url: config.password_reset_url.clone(),
        }
    }
}

#[async_trait]
pub trait PasswordResetService: Send + Sync {
    /// Email a reset link to the account with this address.
    ///
    /// Unknown addresses succeed silently.
    async fn request_reset(&self, email: String) -> AppResult<()>;

    /// Set a new password using a reset token.
    ///
    /// All checks run before anything is written: the token must verify and
    /// carry the `resetPassword` usage, the new password must be a digest, and
    /// the subject must be a visible user. The user is then saved once and a
    /// fresh `client` token is returned.
    async fn reset_password(&self, request: ResetPassword) -> AppResult<TokenResponse>;
}

pub struct PasswordResetter<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenService>,
    mailer: Arc<dyn Mailer>,
    settings: ResetMailSettings,
}

impl<U: UnitOfWork> PasswordResetter<U> {
    pub fn new(
        uow: Arc<U>,
        tokens: Arc<dyn TokenService>,
        mailer: Arc<dyn Mailer>,
        settings: ResetMailSettings,
    ) -> Self {
        Self {
            uow,
            tokens,
            mailer,
            settings,
        }
    }

    fn reset_mail(&self, user: &User, token: &str) -> MailData {
        let minutes = self.tokens.lifetime(TokenUsage::ResetPassword).num_minutes();
        MailData {
            subject: PASSWORD_RESET_SUBJECT.to_string(),
            message: format!(
                "Hello {},\n\n\
                 We received a request to reset your password. Open the link below to choose a new one:\n\n\
                 {}?token={}\n\n\
                 The link expires in {} minutes. If you did not ask for a reset, ignore this email.",
                user.name, self.settings.reset_url, token, minutes
            ),
            to: user.email.clone(),
            from: self.settings.from.clone(),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> PasswordResetService for PasswordResetter<U> {
    async fn request_reset(&self, email: String) -> AppResult<()> {
        let Some(user) = self.uow.users().find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.tokens.issue(user.id, TokenUsage::ResetPassword)?;
        let result = self.mailer.send_mail(self.reset_mail(&user, &token)).await?;

        if !result.is_ok() {
            tracing::warn!(user_id = %user.id, "Reset email was not accepted");
            return Err(AppError::mail_delivery("Reset email was not accepted by the provider"));
        }

        tracing::info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    async fn reset_password(&self, request: ResetPassword) -> AppResult<TokenResponse> {
        let claims = self.tokens.verify(&request.token)?;
        if claims.usage != TokenUsage::ResetPassword {
            return Err(AppError::UnauthorizedTokenUsage);
        }

        let password = PasswordDigest::parse(&request.new_password)?;

        let mut user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        user.change_password(password);
        let user = self.uow.users().save(user).await?;
        tracing::info!(user_id = %user.id, "Password reset");

        client_token(self.tokens.as_ref(), user.id)
    }
}
