//! Password reset flow against in-memory storage and real token signing.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use barbershop_api::domain::{EntityStatus, TokenUsage};
use barbershop_api::errors::AppError;
use barbershop_api::infra::LogMailer;
use barbershop_api::services::{
    AuthService, Authenticator, PasswordResetService, PasswordResetter, ResetPassword,
    TokenService,
};

use common::{reset_settings, sha256_hex, signer, user_with_password, MemoryUnitOfWork, TEST_SECRET};

fn resetter(uow: &Arc<MemoryUnitOfWork>) -> PasswordResetter<MemoryUnitOfWork> {
    PasswordResetter::new(uow.clone(), signer(), Arc::new(LogMailer), reset_settings())
}

#[tokio::test]
async fn test_reset_changes_password_and_returns_client_token() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let tokens = signer();
    let reset = tokens.issue(user.id, TokenUsage::ResetPassword).unwrap();

    let response = resetter(&uow)
        .reset_password(ResetPassword {
            token: reset,
            new_password: sha256_hex("new password"),
        })
        .await
        .unwrap();

    let claims = tokens.verify(&response.token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.usage, TokenUsage::Client);
    assert_eq!(response.token_type, "Bearer");

    assert_eq!(uow.users.save_count(), 1);
    let stored = uow.users.stored(user.id).unwrap();
    assert_eq!(stored.password.as_str(), sha256_hex("new password"));
    assert_eq!(stored.email, user.email);
    assert_eq!(stored.status, EntityStatus::Enabled);
}

#[tokio::test]
async fn test_new_password_works_for_login_and_old_one_does_not() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let reset = signer().issue(user.id, TokenUsage::ResetPassword).unwrap();

    resetter(&uow)
        .reset_password(ResetPassword {
            token: reset,
            new_password: sha256_hex("new password"),
        })
        .await
        .unwrap();

    let auth = Authenticator::new(uow.clone(), signer());
    let old = auth
        .login("u1@example.com".into(), sha256_hex("old password"))
        .await;
    assert!(matches!(old, Err(AppError::InvalidCredentials)));

    let new = auth
        .login("u1@example.com".into(), sha256_hex("new password"))
        .await
        .unwrap();
    let authenticated = auth.authenticate(&new.token).await.unwrap();
    assert_eq!(authenticated.id, user.id);
}

#[tokio::test]
async fn test_client_token_cannot_reset_password() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let client = signer().issue(user.id, TokenUsage::Client).unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token: client,
            new_password: sha256_hex("new password"),
        })
        .await;

    assert!(matches!(result, Err(AppError::UnauthorizedTokenUsage)));
    assert_eq!(uow.users.save_count(), 0);
}

#[tokio::test]
async fn test_plain_password_is_rejected_before_lookup() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let reset = signer().issue(user.id, TokenUsage::ResetPassword).unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token: reset,
            new_password: "new password".into(),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidPasswordFormat)));
    assert_eq!(uow.users.save_count(), 0);
    assert_eq!(
        uow.users.stored(user.id).unwrap().password.as_str(),
        sha256_hex("old password")
    );
}

#[tokio::test]
async fn test_expired_reset_token_is_invalid() {
    #[derive(serde::Serialize)]
    struct Expired {
        sub: String,
        usage: &'static str,
        iat: i64,
        exp: i64,
    }

    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let issued = Utc::now() - Duration::minutes(40);
    let token = encode(
        &Header::default(),
        &Expired {
            sub: user.id.to_string(),
            usage: "resetPassword",
            iat: issued.timestamp(),
            exp: (issued + Duration::minutes(30)).timestamp(),
        },
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token,
            new_password: sha256_hex("new password"),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidToken)));
    assert_eq!(uow.users.save_count(), 0);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_invalid() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let foreign = barbershop_api::services::JwtSigner::new(
        b"some-other-secret-that-is-long-enough",
        Duration::hours(1),
        Duration::minutes(30),
    );
    let reset = foreign.issue(user.id, TokenUsage::ResetPassword).unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token: reset,
            new_password: sha256_hex("new password"),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[tokio::test]
async fn test_reset_for_deleted_user_is_not_found() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let mut user = user_with_password("u1@example.com", "old password");
    user.status = EntityStatus::Deleted;
    let user = uow.seed_user(user);
    let reset = signer().issue(user.id, TokenUsage::ResetPassword).unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token: reset,
            new_password: sha256_hex("new password"),
        })
        .await;

    assert!(matches!(result, Err(AppError::UserNotFound)));
    assert_eq!(uow.users.save_count(), 0);
}

#[tokio::test]
async fn test_extra_claims_do_not_change_usage() {
    let uow = Arc::new(MemoryUnitOfWork::new());
    let user = uow.seed_user(user_with_password("u1@example.com", "old password"));
    let extra = json!({ "usage": "resetPassword", "source": "support" });
    let token = signer()
        .issue_with(
            user.id,
            TokenUsage::Client,
            extra.as_object().cloned().unwrap(),
        )
        .unwrap();

    let result = resetter(&uow)
        .reset_password(ResetPassword {
            token,
            new_password: sha256_hex("new password"),
        })
        .await;

    assert!(matches!(result, Err(AppError::UnauthorizedTokenUsage)));
}

#[tokio::test]
async fn test_request_reset_for_unknown_email_succeeds_quietly() {
    let uow = Arc::new(MemoryUnitOfWork::new());

    resetter(&uow)
        .request_reset("nobody@example.com".into())
        .await
        .unwrap();

    assert_eq!(uow.users.save_count(), 0);
}
