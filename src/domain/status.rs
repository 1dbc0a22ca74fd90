//! Lifecycle status shared by every persisted entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{STATUS_DELETED, STATUS_DISABLED, STATUS_ENABLED};

/// Entity lifecycle status.
///
/// `Deleted` is a soft delete: the row stays but is excluded from every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Enabled,
    Disabled,
    Deleted,
}

impl EntityStatus {
    /// Statuses returned by lookups and listings
    pub const VISIBLE: [EntityStatus; 2] = [EntityStatus::Enabled, EntityStatus::Disabled];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Enabled => STATUS_ENABLED,
            EntityStatus::Disabled => STATUS_DISABLED,
            EntityStatus::Deleted => STATUS_DELETED,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, EntityStatus::Deleted)
    }
}

// Unknown values are treated as deleted so a corrupt row is never exposed
impl From<&str> for EntityStatus {
    fn from(s: &str) -> Self {
        match s {
            STATUS_ENABLED => EntityStatus::Enabled,
            STATUS_DISABLED => EntityStatus::Disabled,
            _ => EntityStatus::Deleted,
        }
    }
}

impl From<EntityStatus> for String {
    fn from(status: EntityStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
