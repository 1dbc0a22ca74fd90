//! Outbound email delivery.
//!
//! [`SendGridMailer`] talks to the SendGrid v3 HTTP API. [`LogMailer`] only
//! writes the message to the log and is meant for development and tests.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A single plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailData {
    pub subject: String,
    pub message: String,
    pub to: String,
    pub from: String,
}

impl MailData {
    fn ensure_complete(&self) -> AppResult<()> {
        let fields = [
            ("subject", &self.subject),
            ("message", &self.message),
            ("to", &self.to),
            ("from", &self.from),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(AppError::invalid_request(format!(
                "Missing email field: {}",
                name
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailStatus {
    Ok,
    Failed,
}

/// Provider outcome. `data` carries whatever metadata the provider returned.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMailResult {
    pub status: MailStatus,
    pub data: Map<String, Value>,
}

impl SendMailResult {
    pub fn ok() -> Self {
        Self {
            status: MailStatus::Ok,
            data: Map::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == MailStatus::Ok
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    ///
    /// Fails with `Configuration` when no delivery credential is set and with
    /// `InvalidRequest` when any field is empty. A provider rejection is not
    /// an error: it comes back as [`MailStatus::Failed`].
    async fn send_mail(&self, mail: MailData) -> AppResult<SendMailResult>;
}

pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl SendGridMailer {
    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|key| !key.is_empty()),
            api_url: api_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.sendgrid_api_key().map(str::to_string),
            config.sendgrid_api_url.clone(),
        )
    }

    fn payload(mail: &MailData) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": mail.to }] }],
            "from": { "email": mail.from },
            "subject": mail.subject,
            "content": [{ "type": "text/plain", "value": mail.message }],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send_mail(&self, mail: MailData) -> AppResult<SendMailResult> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::configuration("Email is not configured properly. Missing api key")
        })?;
        mail.ensure_complete()?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&Self::payload(&mail))
            .send()
            .await
            .map_err(|e| AppError::mail_delivery(e.to_string()))?;

        let status = response.status();
        let data: Map<String, Value> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
            })
            .collect();

        if status.is_success() {
            tracing::info!(to = %mail.to, status = status.as_u16(), "Email accepted by SendGrid");
            Ok(SendMailResult {
                status: MailStatus::Ok,
                data,
            })
        } else {
            tracing::warn!(to = %mail.to, status = status.as_u16(), "SendGrid rejected email");
            Ok(SendMailResult {
                status: MailStatus::Failed,
                data,
            })
        }
    }
}

/// Development mailer: logs the message instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_mail(&self, mail: MailData) -> AppResult<SendMailResult> {
        mail.ensure_complete()?;

        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            mail.from,
            mail.to,
            mail.subject,
            mail.message
        );
        Ok(SendMailResult::ok())
    }
}
