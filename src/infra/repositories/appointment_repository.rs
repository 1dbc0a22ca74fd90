//! Appointment repository with status-based soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::appointment::{self, ActiveModel, Entity as AppointmentEntity};
use super::status::visible;
use crate::domain::{Appointment, EntityStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// Appointments booked by a client, soonest first
    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Appointment>>;

    /// Appointments booked at a barbershop, soonest first
    async fn list_by_barbershop(&self, barbershop_id: Uuid) -> AppResult<Vec<Appointment>>;

    async fn save(&self, appointment: Appointment) -> AppResult<Appointment>;

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Appointment>;
}

pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let result = AppointmentEntity::find_by_id(id)
            .filter(visible(appointment::Column::Status))
            .one(&self.db)
            .await?;

        Ok(result.map(Appointment::from))
    }

    async fn list_by_client(&self, client_id: Uuid) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(appointment::Column::ClientId.eq(client_id))
            .filter(visible(appointment::Column::Status))
            .order_by_asc(appointment::Column::Date)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Appointment::from).collect())
    }

    async fn list_by_barbershop(&self, barbershop_id: Uuid) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(appointment::Column::BarbershopId.eq(barbershop_id))
            .filter(visible(appointment::Column::Status))
            .order_by_asc(appointment::Column::Date)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Appointment::from).collect())
    }

    async fn save(&self, appointment: Appointment) -> AppResult<Appointment> {
        let exists = AppointmentEntity::find_by_id(appointment.id)
            .one(&self.db)
            .await?
            .is_some();
        let active = ActiveModel {
            id: Set(appointment.id),
            client_id: Set(appointment.client_id),
            service_id: Set(appointment.service_id),
            barbershop_id: Set(appointment.barbershop_id),
            date: Set(appointment.date),
            status: Set(appointment.status.to_string()),
            created_at: Set(appointment.created_at),
            updated_at: Set(Utc::now()),
        };

        let model = if exists {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        Ok(Appointment::from(model))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Appointment> {
        let appointment = AppointmentEntity::find_by_id(id)
            .filter(visible(appointment::Column::Status))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = appointment.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Appointment::from(model))
    }
}
