//! Token service - Signed, time-bounded tokens carrying a usage tag.
//!
//! Tokens are HS256 JWTs. Besides the standard `sub`, `iat` and `exp` claims
//! each token has a `usage` claim saying what it may be used for. Callers
//! decide whether a usage is acceptable; verification only checks that the
//! token is authentic, unexpired and well-formed.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, RESERVED_CLAIMS, TOKEN_TYPE_BEARER};
use crate::domain::TokenUsage;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub usage: TokenUsage,
    pub iat: i64,
    pub exp: i64,
    /// Caller supplied claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token returned to the client after login or password reset
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed `client` token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Issue a `client` token for a user (shared by login and password reset)
pub(crate) fn client_token(tokens: &dyn TokenService, user_id: Uuid) -> AppResult<TokenResponse> {
    let token = tokens.issue(user_id, TokenUsage::Client)?;
    Ok(TokenResponse {
        token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: tokens.lifetime(TokenUsage::Client).num_seconds(),
    })
}

pub trait TokenService: Send + Sync {
    fn issue(&self, subject: Uuid, usage: TokenUsage) -> AppResult<String> {
        self.issue_with(subject, usage, Map::new())
    }

    /// Issue a token with additional claims. Reserved claim names in `extra`
    /// are dropped.
    fn issue_with(
        &self,
        subject: Uuid,
        usage: TokenUsage,
        extra: Map<String, Value>,
    ) -> AppResult<String>;

    /// Check signature, expiry and shape, then decode. Any failure is
    /// reported as `InvalidToken`.
    fn verify(&self, token: &str) -> AppResult<Claims>;

    /// How long a freshly issued token of this usage stays valid
    fn lifetime(&self, usage: TokenUsage) -> Duration;
}

/// HMAC-SHA256 token signer
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    client_ttl: Duration,
    reset_ttl: Duration,
}

impl JwtSigner {
    pub fn new(secret: &[u8], client_ttl: Duration, reset_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            client_ttl,
            reset_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret_bytes(),
            Duration::hours(config.jwt_expiration_hours),
            Duration::minutes(config.reset_token_expiration_minutes),
        )
    }
}

impl TokenService for JwtSigner {
    fn issue_with(
        &self,
        subject: Uuid,
        usage: TokenUsage,
        mut extra: Map<String, Value>,
    ) -> AppResult<String> {
        extra.retain(|key, _| !RESERVED_CLAIMS.contains(&key.as_str()));

        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            usage,
            iat: now.timestamp(),
            exp: (now + self.lifetime(usage)).timestamp(),
            extra,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AppError::internal(e.to_string())
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AppError::InvalidToken
            })
    }

    fn lifetime(&self, usage: TokenUsage) -> Duration {
        match usage {
            TokenUsage::Client => self.client_ttl,
            TokenUsage::ResetPassword => self.reset_ttl,
        }
    }
}
