//! Barbershop domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::EntityStatus;

/// A barbershop profile. Every user owns at most one.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Barbershop {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Owning user
    pub owner_id: Uuid,
    #[schema(example = "Fade Factory")]
    pub name: String,
    #[schema(example = "12 Main Street")]
    pub address: String,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Barbershop {
    pub fn new(owner_id: Uuid, name: String, address: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            address,
            slogan: None,
            description: None,
            status: EntityStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Apply a profile update. Absent or empty fields keep their current value.
    pub fn apply(&mut self, changes: BarbershopChanges) {
        if let Some(name) = non_empty(changes.name) {
            self.name = name;
        }
        if let Some(address) = non_empty(changes.address) {
            self.address = address;
        }
        if let Some(slogan) = non_empty(changes.slogan) {
            self.slogan = Some(slogan);
        }
        if let Some(description) = non_empty(changes.description) {
            self.description = Some(description);
        }
    }
}

/// Barbershop profile update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BarbershopChanges {
    #[schema(example = "Fade Factory")]
    pub name: Option<String>,
    #[schema(example = "Sharp looks, sharp blades")]
    pub slogan: Option<String>,
    #[schema(example = "12 Main Street")]
    pub address: Option<String>,
    pub description: Option<String>,
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
