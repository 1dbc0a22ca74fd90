//! Appointment domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{BarberService, EntityStatus};

/// A client's booking of a barber service at a given time.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    /// Booking user
    pub client_id: Uuid,
    pub service_id: Uuid,
    /// Barbershop providing the booked service
    pub barbershop_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(client_id: Uuid, service: &BarberService, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            service_id: service.id,
            barbershop_id: service.barbershop_id,
            date,
            status: EntityStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_client(&self, user_id: Uuid) -> bool {
        self.client_id == user_id
    }
}
