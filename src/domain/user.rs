//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{EntityStatus, PasswordDigest};
use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password: PasswordDigest,
    pub role: UserRole,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new enabled user with default role
    pub fn new(email: String, name: String, password: PasswordDigest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password,
            role: UserRole::User,
            status: EntityStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Overwrite the stored credential. Nothing else on the record changes.
    pub fn change_password(&mut self, password: PasswordDigest) {
        self.password = password;
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User role
    #[schema(example = "user")]
    pub role: String,
    /// Lifecycle status
    pub status: EntityStatus,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            status: user.status,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "ab30bc8b2c1e8d4bd6c3b0ad3d4d6b0f4f09c4cbb8f3ad0e3e0cb0d1e0f0a1b2";

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "client@example.com".to_string(),
            "Client".to_string(),
            PasswordDigest::parse(DIGEST).unwrap(),
        );

        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, EntityStatus::Enabled);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_change_password_touches_only_password() {
        let user = User::new(
            "client@example.com".to_string(),
            "Client".to_string(),
            PasswordDigest::from_stored("0".repeat(64)),
        );
        let mut changed = user.clone();
        changed.change_password(PasswordDigest::parse(DIGEST).unwrap());

        assert_eq!(changed.password.as_str(), DIGEST);
        assert_eq!(changed.id, user.id);
        assert_eq!(changed.email, user.email);
        assert_eq!(changed.updated_at, user.updated_at);
    }

    #[test]
    fn test_response_omits_password() {
        let user = User::new(
            "client@example.com".to_string(),
            "Client".to_string(),
            PasswordDigest::parse(DIGEST).unwrap(),
        );
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains(DIGEST));
        assert!(json.contains("\"status\":\"enabled\""));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("barber"), UserRole::User);
    }
}
