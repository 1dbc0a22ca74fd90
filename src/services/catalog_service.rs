//! Catalog service - barber services offered by barbershops.
//!
//! Searching checks that referenced barbershops and service types exist so
//! that a typo in a filter is reported instead of returning an empty list.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::barbershop_service::owned_barbershop;
use crate::domain::{BarberService, BarberServiceChanges, EntityStatus, ServiceFilter};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Data needed to offer a new service
#[derive(Debug, Clone)]
pub struct NewBarberService {
    pub service_type_id: Uuid,
    pub title: String,
    /// Minor currency units
    pub price: i64,
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Search services. A zero price bound means "no bound".
    async fn search(&self, filter: ServiceFilter) -> AppResult<Vec<BarberService>>;

    async fn get(&self, id: Uuid) -> AppResult<BarberService>;

    /// Offer a service at the caller's barbershop
    async fn create(&self, owner_id: Uuid, data: NewBarberService) -> AppResult<BarberService>;

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: BarberServiceChanges,
    ) -> AppResult<BarberService>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<BarberService>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_barbershop(&self, id: Uuid) -> AppResult<()> {
        match self.uow.barbershops().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::bad_request(format!(
                "Provided barbershop {} does not exist",
                id
            ))),
        }
    }

    async fn ensure_service_type(&self, id: Uuid) -> AppResult<()> {
        match self.uow.service_types().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::bad_request(format!(
                "Provided service type {} does not exist",
                id
            ))),
        }
    }

    /// Load a service whose barbershop is owned by the caller
    async fn owned_service(&self, owner_id: Uuid, id: Uuid) -> AppResult<BarberService> {
        let service = self.get(id).await?;
        owned_barbershop(self.uow.as_ref(), owner_id, service.barbershop_id).await?;
        Ok(service)
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn search(&self, filter: ServiceFilter) -> AppResult<Vec<BarberService>> {
        if let Some(id) = filter.barbershop_id {
            self.ensure_barbershop(id).await?;
        }
        if let Some(id) = filter.service_type_id {
            self.ensure_service_type(id).await?;
        }

        let filter = ServiceFilter {
            price_min: filter.price_min.filter(|price| *price != 0),
            price_max: filter.price_max.filter(|price| *price != 0),
            ..filter
        };
        self.uow.barber_services().search(filter).await
    }

    async fn get(&self, id: Uuid) -> AppResult<BarberService> {
        self.uow
            .barber_services()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, owner_id: Uuid, data: NewBarberService) -> AppResult<BarberService> {
        let barbershop = self
            .uow
            .barbershops()
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| AppError::bad_request("User does not own a barbershop"))?;
        self.ensure_service_type(data.service_type_id).await?;

        let service = BarberService::new(barbershop.id, data.service_type_id, data.title, data.price);
        let service = self.uow.barber_services().save(service).await?;
        tracing::info!(service_id = %service.id, barbershop_id = %barbershop.id, "Service created");
        Ok(service)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: BarberServiceChanges,
    ) -> AppResult<BarberService> {
        let mut service = self.owned_service(owner_id, id).await?;
        if let Some(service_type_id) = changes.service_type_id {
            self.ensure_service_type(service_type_id).await?;
        }

        service.apply(changes);
        self.uow.barber_services().save(service).await
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<BarberService> {
        self.owned_service(owner_id, id).await?;
        self.uow
            .barber_services()
            .set_status(id, EntityStatus::Deleted)
            .await
    }
}
