//! Barbershop repository with status-based soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::barbershop::{self, ActiveModel, Entity as BarbershopEntity};
use super::status::visible;
use crate::domain::{Barbershop, EntityStatus};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Barbershop repository trait. Deleted barbershops are never returned.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BarbershopRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Barbershop>>;

    /// Find the barbershop owned by a user
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Barbershop>>;

    /// Page through barbershops, oldest first. Returns the page and the total count.
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Barbershop>, u64)>;

    async fn save(&self, barbershop: Barbershop) -> AppResult<Barbershop>;

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Barbershop>;
}

pub struct BarbershopStore {
    db: DatabaseConnection,
}

impl BarbershopStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(barbershop: Barbershop) -> ActiveModel {
    ActiveModel {
        id: Set(barbershop.id),
        owner_id: Set(barbershop.owner_id),
        name: Set(barbershop.name),
        address: Set(barbershop.address),
        slogan: Set(barbershop.slogan),
        description: Set(barbershop.description),
        status: Set(barbershop.status.to_string()),
        created_at: Set(barbershop.created_at),
        updated_at: Set(Utc::now()),
    }
}

#[async_trait]
impl BarbershopRepository for BarbershopStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Barbershop>> {
        let result = BarbershopEntity::find_by_id(id)
            .filter(visible(barbershop::Column::Status))
            .one(&self.db)
            .await?;

        Ok(result.map(Barbershop::from))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Barbershop>> {
        let result = BarbershopEntity::find()
            .filter(barbershop::Column::OwnerId.eq(owner_id))
            .filter(visible(barbershop::Column::Status))
            .one(&self.db)
            .await?;

        Ok(result.map(Barbershop::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Barbershop>, u64)> {
        let paginator = BarbershopEntity::find()
            .filter(visible(barbershop::Column::Status))
            .order_by_asc(barbershop::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Barbershop::from).collect(), total))
    }

    async fn save(&self, barbershop: Barbershop) -> AppResult<Barbershop> {
        let exists = BarbershopEntity::find_by_id(barbershop.id)
            .one(&self.db)
            .await?
            .is_some();
        let active = to_active_model(barbershop);

        let model = if exists {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        Ok(Barbershop::from(model))
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Barbershop> {
        let barbershop = BarbershopEntity::find_by_id(id)
            .filter(visible(barbershop::Column::Status))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = barbershop.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Barbershop::from(model))
    }
}
