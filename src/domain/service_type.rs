//! Service type domain entity (haircut, shave, ...).

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EntityStatus;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceType {
    pub id: Uuid,
    #[schema(example = "Haircut")]
    pub title: String,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceType {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            status: EntityStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }
}
