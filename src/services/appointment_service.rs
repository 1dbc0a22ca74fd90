//! Appointment service - booking and managing appointments.
//!
//! An appointment is visible to the client who booked it and to the owner of
//! the barbershop providing the service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::barbershop_service::owned_barbershop;
use crate::domain::{Appointment, EntityStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Book a service for the caller. The date must be in the future.
    async fn book(
        &self,
        client_id: Uuid,
        service_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Appointment>;

    /// Appointments the caller booked
    async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Appointment>>;

    /// Appointments at the caller's barbershop. Empty if the caller owns none.
    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Appointment>>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<Appointment>;

    /// Confirm (`enabled`) or suspend (`disabled`); barbershop owner only
    async fn set_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: EntityStatus,
    ) -> AppResult<Appointment>;

    /// Cancel; allowed for the client and the barbershop owner
    async fn cancel(&self, user_id: Uuid, id: Uuid) -> AppResult<Appointment>;
}

pub struct AppointmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AppointmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: Uuid) -> AppResult<Appointment> {
        self.uow
            .appointments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Load an appointment the caller is a party to
    async fn accessible(&self, user_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        let appointment = self.find(id).await?;
        if appointment.is_client(user_id) {
            return Ok(appointment);
        }

        match owned_barbershop(self.uow.as_ref(), user_id, appointment.barbershop_id).await {
            Ok(_) => Ok(appointment),
            Err(AppError::Unauthorized) | Err(AppError::NotFound) => Err(AppError::Forbidden),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AppointmentService for AppointmentManager<U> {
    async fn book(
        &self,
        client_id: Uuid,
        service_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Appointment> {
        if date <= Utc::now() {
            return Err(AppError::validation("Appointment date must be in the future"));
        }

        let service = self
            .uow
            .barber_services()
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(format!("Provided service {} does not exist", service_id))
            })?;

        let appointment = self
            .uow
            .appointments()
            .save(Appointment::new(client_id, &service, date))
            .await?;
        tracing::info!(appointment_id = %appointment.id, %client_id, "Appointment booked");
        Ok(appointment)
    }

    async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<Appointment>> {
        self.uow.appointments().list_by_client(client_id).await
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Appointment>> {
        match self.uow.barbershops().find_by_owner(owner_id).await? {
            Some(barbershop) => self.uow.appointments().list_by_barbershop(barbershop.id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        self.accessible(user_id, id).await
    }

    async fn set_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: EntityStatus,
    ) -> AppResult<Appointment> {
        if !status.is_visible() {
            return Err(AppError::validation("Status must be enabled or disabled"));
        }

        let appointment = self.find(id).await?;
        owned_barbershop(self.uow.as_ref(), owner_id, appointment.barbershop_id).await?;
        self.uow.appointments().set_status(id, status).await
    }

    async fn cancel(&self, user_id: Uuid, id: Uuid) -> AppResult<Appointment> {
        self.accessible(user_id, id).await?;
        let appointment = self
            .uow
            .appointments()
            .set_status(id, EntityStatus::Deleted)
            .await?;
        tracing::info!(appointment_id = %id, %user_id, "Appointment cancelled");
        Ok(appointment)
    }
}
