//! Token usage tags.

use serde::{Deserialize, Serialize};

use crate::config::{TOKEN_USAGE_CLIENT, TOKEN_USAGE_RESET_PASSWORD};

/// What an otherwise valid token authorizes.
///
/// The set is closed: a token carrying any other tag fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenUsage {
    /// General session token
    #[serde(rename = "client")]
    Client,
    /// Single-purpose, short-lived password reset credential
    #[serde(rename = "resetPassword")]
    ResetPassword,
}

impl TokenUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenUsage::Client => TOKEN_USAGE_CLIENT,
            TokenUsage::ResetPassword => TOKEN_USAGE_RESET_PASSWORD,
        }
    }
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
