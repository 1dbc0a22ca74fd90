//! User service - Handles user-related business logic.
//!
//! All operations only see users whose status is `enabled` or `disabled`.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{EntityStatus, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Soft delete: the account keeps its email but can no longer log in
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        let user = self.uow.users().set_status(id, EntityStatus::Deleted).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordDigest;
    use crate::infra::{MockUnitOfWork, MockUserRepository, UserRepository};
    use mockall::predicate::eq;

    fn manager(users: MockUserRepository) -> UserManager<MockUnitOfWork> {
        let users: Arc<dyn UserRepository> = Arc::new(users);
        let mut uow = MockUnitOfWork::new();
        uow.expect_users().return_const(users);
        UserManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let err = manager(users).get_user(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn test_delete_sets_deleted_status() {
        let id = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users
            .expect_set_status()
            .with(eq(id), eq(EntityStatus::Deleted))
            .times(1)
            .returning(|_, status| {
                let mut user = User::new(
                    "gone@example.com".into(),
                    "Gone".into(),
                    PasswordDigest::parse(&"b".repeat(64)).unwrap(),
                );
                user.status = status;
                Ok(user)
            });

        let user = manager(users).delete_user(id).await.unwrap();
        assert_eq!(user.status, EntityStatus::Deleted);
    }
}
