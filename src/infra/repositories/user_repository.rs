//! User repository with status-based soft delete.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::status::visible;
use crate::domain::{EntityStatus, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups only return users whose status is `enabled` or `disabled`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a non-deleted user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a non-deleted user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by email regardless of status
    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert the user if its id is unknown, otherwise overwrite the stored record
    async fn save(&self, user: User) -> AppResult<User>;

    /// List all non-deleted users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Move a non-deleted user to `status` (enable, disable or soft delete)
    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<User>;
}

/// SeaORM backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(user: User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        email: Set(user.email),
        name: Set(user.name),
        password: Set(user.password.into_string()),
        role: Set(user.role.to_string()),
        status: Set(user.status.to_string()),
        created_at: Set(user.created_at),
        updated_at: Set(Utc::now()),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(visible(user::Column::Status))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(visible(user::Column::Status))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let exists = UserEntity::find_by_id(user.id).one(&self.db).await?.is_some();
        let active = to_active_model(user);

        let model = if exists {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };

        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .filter(visible(user::Column::Status))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .filter(visible(user::Column::Status))
            .one(&self.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut active: ActiveModel = user.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
