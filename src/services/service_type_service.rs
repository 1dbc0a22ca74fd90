//! Service type service. Write operations are restricted to admins at the
//! routing layer.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{EntityStatus, ServiceType};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ServiceTypeService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<ServiceType>>;

    async fn get(&self, id: Uuid) -> AppResult<ServiceType>;

    async fn create(&self, title: String) -> AppResult<ServiceType>;

    async fn rename(&self, id: Uuid, title: String) -> AppResult<ServiceType>;

    async fn delete(&self, id: Uuid) -> AppResult<ServiceType>;
}

pub struct ServiceTypeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ServiceTypeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ServiceTypeService for ServiceTypeManager<U> {
    async fn list(&self) -> AppResult<Vec<ServiceType>> {
        self.uow.service_types().list().await
    }

    async fn get(&self, id: Uuid) -> AppResult<ServiceType> {
        self.uow
            .service_types()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, title: String) -> AppResult<ServiceType> {
        let service_type = self.uow.service_types().save(ServiceType::new(title)).await?;
        tracing::info!(service_type_id = %service_type.id, "Service type created");
        Ok(service_type)
    }

    async fn rename(&self, id: Uuid, title: String) -> AppResult<ServiceType> {
        let mut service_type = self.get(id).await?;
        service_type.title = title;
        self.uow.service_types().save(service_type).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<ServiceType> {
        self.uow
            .service_types()
            .set_status(id, EntityStatus::Deleted)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockServiceTypeRepository, MockUnitOfWork, ServiceTypeRepository};

    fn manager(types: MockServiceTypeRepository) -> ServiceTypeManager<MockUnitOfWork> {
        let types: Arc<dyn ServiceTypeRepository> = Arc::new(types);
        let mut uow = MockUnitOfWork::new();
        uow.expect_service_types().return_const(types);
        ServiceTypeManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_rename_keeps_identity() {
        let existing = ServiceType::new("Haircut".into());
        let id = existing.id;
        let mut types = MockServiceTypeRepository::new();
        types
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        types
            .expect_save()
            .times(1)
            .withf(move |saved| saved.id == id && saved.title == "Beard trim")
            .returning(|saved| Ok(saved));

        let renamed = manager(types).rename(id, "Beard trim".into()).await.unwrap();
        assert_eq!(renamed.id, id);
    }

    #[tokio::test]
    async fn test_rename_missing_is_not_found() {
        let mut types = MockServiceTypeRepository::new();
        types.expect_find_by_id().returning(|_| Ok(None));
        types.expect_save().times(0);

        let err = manager(types)
            .rename(Uuid::new_v4(), "Shave".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
