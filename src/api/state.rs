//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AppointmentService, AuthService, BarbershopService, CatalogService, PasswordResetService,
    ServiceContainer, ServiceTypeService, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub password_reset_service: Arc<dyn PasswordResetService>,
    pub user_service: Arc<dyn UserService>,
    pub barbershop_service: Arc<dyn BarbershopService>,
    pub service_type_service: Arc<dyn ServiceTypeService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub appointment_service: Arc<dyn AppointmentService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from the database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::from_container(&services, database)
    }

    /// Create application state from any service container.
    ///
    /// Tests use this with a container of fakes or mocks.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            password_reset_service: container.password_reset(),
            user_service: container.users(),
            barbershop_service: container.barbershops(),
            service_type_service: container.service_types(),
            catalog_service: container.catalog(),
            appointment_service: container.appointments(),
            database,
        }
    }
}
