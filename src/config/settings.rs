//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MAIL_FROM,
    DEFAULT_PASSWORD_RESET_URL, DEFAULT_RESET_TOKEN_EXPIRATION_MINUTES, DEFAULT_SENDGRID_API_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MAX_JWT_EXPIRATION_HOURS,
    MAX_RESET_TOKEN_EXPIRATION_MINUTES, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Outbound mail backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailDriver {
    /// Deliver through the SendGrid HTTP API
    SendGrid,
    /// Log messages instead of sending them (development)
    Log,
}

impl MailDriver {
    fn parse(value: &str) -> AppResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sendgrid" => Ok(MailDriver::SendGrid),
            "log" => Ok(MailDriver::Log),
            other => Err(AppError::configuration(format!(
                "Unknown MAIL_DRIVER '{}', expected 'sendgrid' or 'log'",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub reset_token_expiration_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
    pub mail_driver: MailDriver,
    sendgrid_api_key: Option<String>,
    pub sendgrid_api_url: String,
    pub mail_from: String,
    pub password_reset_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field(
                "reset_token_expiration_minutes",
                &self.reset_token_expiration_minutes,
            )
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("mail_driver", &self.mail_driver)
            .field(
                "sendgrid_api_key",
                &self.sendgrid_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("mail_from", &self.mail_from)
            .field("password_reset_url", &self.password_reset_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns a configuration error if JWT_SECRET is missing in a release
    /// build, too short, or if MAIL_DRIVER is not recognised.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::configuration(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let mail_driver = match env::var("MAIL_DRIVER") {
            Ok(value) => MailDriver::parse(&value)?,
            Err(_) => MailDriver::SendGrid,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: token_lifetime(
                "JWT_EXPIRATION_HOURS",
                env::var("JWT_EXPIRATION_HOURS").ok(),
                DEFAULT_JWT_EXPIRATION_HOURS,
                MAX_JWT_EXPIRATION_HOURS,
            )?,
            reset_token_expiration_minutes: token_lifetime(
                "RESET_TOKEN_EXPIRATION_MINUTES",
                env::var("RESET_TOKEN_EXPIRATION_MINUTES").ok(),
                DEFAULT_RESET_TOKEN_EXPIRATION_MINUTES,
                MAX_RESET_TOKEN_EXPIRATION_MINUTES,
            )?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            mail_driver,
            sendgrid_api_key: env::var("SENDGRID_API_KEY").ok().filter(|k| !k.is_empty()),
            sendgrid_api_url: env::var("SENDGRID_API_URL")
                .unwrap_or_else(|_| DEFAULT_SENDGRID_API_URL.to_string()),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string()),
            password_reset_url: env::var("PASSWORD_RESET_URL")
                .unwrap_or_else(|_| DEFAULT_PASSWORD_RESET_URL.to_string()),
        })
    }

    /// Build a configuration directly, bypassing the environment.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            reset_token_expiration_minutes: DEFAULT_RESET_TOKEN_EXPIRATION_MINUTES,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            mail_driver: MailDriver::Log,
            sendgrid_api_key: None,
            sendgrid_api_url: DEFAULT_SENDGRID_API_URL.to_string(),
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            password_reset_url: DEFAULT_PASSWORD_RESET_URL.to_string(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// SendGrid API key, if one was configured.
    pub fn sendgrid_api_key(&self) -> Option<&str> {
        self.sendgrid_api_key.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// A token lifetime must be a whole number in `1..=max`. Unset means `default`.
fn token_lifetime(key: &str, raw: Option<String>, default: i64, max: i64) -> AppResult<i64> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if (1..=max).contains(&value) => Ok(value),
        _ => Err(AppError::configuration(format!(
            "{} must be a whole number between 1 and {}, got '{}'",
            key, max, raw
        ))),
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
