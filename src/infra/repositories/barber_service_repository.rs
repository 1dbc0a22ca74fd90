//! Barber service repository with status-based soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::barber_service::{self, ActiveModel, Entity as BarberServiceEntity};
use super::status::visible;
use crate::domain::{BarberService, EntityStatus, ServiceFilter};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BarberServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BarberService>>;

    /// List non-deleted services matching every criterion of `filter`, cheapest first
    async fn search(&self, filter: ServiceFilter) -> AppResult<Vec<BarberService>>;

    async fn save(&self, service: BarberService) -> AppResult<BarberService>;

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<BarberService>;
}

pub struct BarberServiceStore {
    db: DatabaseConnection,
}

impl BarberServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BarberServiceRepository for BarberServiceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BarberService>> {
        let result = BarberServiceEntity::find_by_id(id)
            .filter(visible(barber_service::Column::Status))
            .one(&self.db)
            .await?;

        Ok(result.map(BarberService::from))
    }

    async fn search(&self, filter: ServiceFilter) -> AppResult<Vec<BarberService>> {
        let mut query = BarberServiceEntity::find().filter(visible(barber_service::Column::Status));

        if let Some(barbershop_id) = filter.barbershop_id {
            query = query.filter(barber_service::Column::BarbershopId.eq(barbershop_id));
        }
        if let Some(service_type_id) = filter.service_type_id {
            query = query.filter(barber_service::Column::ServiceTypeId.eq(service_type_id));
        }
        if let Some(min) = filter.price_min {
            query = query.filter(barber_service::Column::Price.gte(min));
        }
        if let Some(max) = filter.price_max {
            query = query.filter(barber_service::Column::Price.lte(max));
        }

        let models = query
            .order_by_asc(barber_service::Column::Price)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(BarberService::from).collect())
    }

    async fn save(&self, service: BarberService) -> AppResult<BarberService> {
        let exists = BarberServiceEntity::find_by_id(service.id)
            .one(&self.db)
            .await?
            .is_some();
        let active = ActiveModel {
            id: Set(service.id),
            barbershop_id: Set(service.barbershop_id),
            service_type_id: Set(service.service_type_id),
            title: Set(service.title),
            price: Set(service.price),
            status: Set(service.status.to_string()),
            created_at: Set(service.created_at),
            updated_at: Set(Utc::now()),
        };

        let model = if exists {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        Ok(BarberService::from(model))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<BarberService> {
        let service = BarberServiceEntity::find_by_id(id)
            .filter(visible(barber_service::Column::Status))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = service.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(BarberService::from(model))
    }
}
