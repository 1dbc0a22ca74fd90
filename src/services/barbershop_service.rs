//! Barbershop profile service.
//!
//! A user owns at most one barbershop. Updates and deletes go through
//! [`owned_barbershop`], which identifies the barbershop and checks that the
//! caller owns it.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Barbershop, BarbershopChanges, EntityStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Data needed to open a barbershop
#[derive(Debug, Clone)]
pub struct NewBarbershop {
    pub name: String,
    pub address: String,
}

#[async_trait]
pub trait BarbershopService: Send + Sync {
    async fn create(&self, owner_id: Uuid, data: NewBarbershop) -> AppResult<Barbershop>;

    async fn get(&self, id: Uuid) -> AppResult<Barbershop>;

    async fn list(&self, params: PaginationParams) -> AppResult<Paginated<Barbershop>>;

    /// Update the caller's own barbershop. Empty fields are left unchanged.
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: BarbershopChanges,
    ) -> AppResult<Barbershop>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<Barbershop>;
}

/// Load a barbershop and require that `user_id` owns it.
pub(crate) async fn owned_barbershop<U: UnitOfWork + ?Sized>(
    uow: &U,
    user_id: Uuid,
    barbershop_id: Uuid,
) -> AppResult<Barbershop> {
    let barbershop = uow
        .barbershops()
        .find_by_id(barbershop_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !barbershop.is_owned_by(user_id) {
        tracing::warn!(%user_id, %barbershop_id, "Barbershop access by non-owner");
        return Err(AppError::Unauthorized);
    }
    Ok(barbershop)
}

pub struct BarbershopManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BarbershopManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BarbershopService for BarbershopManager<U> {
    async fn create(&self, owner_id: Uuid, data: NewBarbershop) -> AppResult<Barbershop> {
        if self.uow.barbershops().find_by_owner(owner_id).await?.is_some() {
            return Err(AppError::conflict("User already has a barbershop"));
        }

        let barbershop = self
            .uow
            .barbershops()
            .save(Barbershop::new(owner_id, data.name, data.address))
            .await?;
        tracing::info!(barbershop_id = %barbershop.id, %owner_id, "Barbershop created");
        Ok(barbershop)
    }

    async fn get(&self, id: Uuid) -> AppResult<Barbershop> {
        self.uow
            .barbershops()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self, params: PaginationParams) -> AppResult<Paginated<Barbershop>> {
        let (items, total) = self.uow.barbershops().list(&params).await?;
        Ok(Paginated::new(items, params.page, params.limit(), total))
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: BarbershopChanges,
    ) -> AppResult<Barbershop> {
        let mut barbershop = owned_barbershop(self.uow.as_ref(), owner_id, id).await?;
        barbershop.apply(changes);
        self.uow.barbershops().save(barbershop).await
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<Barbershop> {
        owned_barbershop(self.uow.as_ref(), owner_id, id).await?;
        let barbershop = self
            .uow
            .barbershops()
            .set_status(id, EntityStatus::Deleted)
            .await?;
        tracing::info!(barbershop_id = %id, "Barbershop deleted");
        Ok(barbershop)
    }
}
