//! Service type repository with status-based soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::entities::service_type::{self, ActiveModel, Entity as ServiceTypeEntity};
use super::status::visible;
use crate::domain::{EntityStatus, ServiceType};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceType>>;

    /// List non-deleted service types ordered by title
    async fn list(&self) -> AppResult<Vec<ServiceType>>;

    async fn save(&self, service_type: ServiceType) -> AppResult<ServiceType>;

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<ServiceType>;
}

pub struct ServiceTypeStore {
    db: DatabaseConnection,
}

impl ServiceTypeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceTypeRepository for ServiceTypeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceType>> {
        let result = ServiceTypeEntity::find_by_id(id)
            .filter(visible(service_type::Column::Status))
            .one(&self.db)
            .await?;

        Ok(result.map(ServiceType::from))
    }

    async fn list(&self) -> AppResult<Vec<ServiceType>> {
        let models = ServiceTypeEntity::find()
            .filter(visible(service_type::Column::Status))
            .order_by_asc(service_type::Column::Title)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ServiceType::from).collect())
    }

    async fn save(&self, service_type: ServiceType) -> AppResult<ServiceType> {
        let exists = ServiceTypeEntity::find_by_id(service_type.id)
            .one(&self.db)
            .await?
            .is_some();
        let active = ActiveModel {
            id: Set(service_type.id),
            title: Set(service_type.title),
            status: Set(service_type.status.to_string()),
            created_at: Set(service_type.created_at),
            updated_at: Set(Utc::now()),
        };

        let model = if exists {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        Ok(ServiceType::from(model))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<ServiceType> {
        let service_type = ServiceTypeEntity::find_by_id(id)
            .filter(visible(service_type::Column::Status))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = service_type.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(ServiceType::from(model))
    }
}
