//! Service Container - Centralized service access.
//!
//! Wires every service from a database connection and the process
//! configuration. Handlers only see the service traits.

use std::sync::Arc;

use super::{
    AppointmentManager, AppointmentService, AuthService, Authenticator, BarbershopManager,
    BarbershopService, CatalogManager, CatalogService, JwtSigner, PasswordResetService,
    PasswordResetter, ResetMailSettings, ServiceTypeManager, ServiceTypeService, TokenService,
    UserManager, UserService,
};
use crate::config::{Config, MailDriver};
use crate::infra::{LogMailer, Mailer, Persistence, SendGridMailer};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn password_reset(&self) -> Arc<dyn PasswordResetService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn barbershops(&self) -> Arc<dyn BarbershopService>;

    fn service_types(&self) -> Arc<dyn ServiceTypeService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn appointments(&self) -> Arc<dyn AppointmentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    password_reset: Arc<dyn PasswordResetService>,
    users: Arc<dyn UserService>,
    barbershops: Arc<dyn BarbershopService>,
    service_types: Arc<dyn ServiceTypeService>,
    catalog: Arc<dyn CatalogService>,
    appointments: Arc<dyn AppointmentService>,
}

impl Services {
    /// Build every service on top of one database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtSigner::from_config(config));

        let mailer: Arc<dyn Mailer> = match config.mail_driver {
            MailDriver::SendGrid => Arc::new(SendGridMailer::from_config(config)),
            MailDriver::Log => Arc::new(LogMailer),
        };
        tracing::debug!(driver = ?config.mail_driver, "Mailer selected");

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), tokens.clone())),
            password_reset: Arc::new(PasswordResetter::new(
                uow.clone(),
                tokens,
                mailer,
                ResetMailSettings::from_config(config),
            )),
            users: Arc::new(UserManager::new(uow.clone())),
            barbershops: Arc::new(BarbershopManager::new(uow.clone())),
            service_types: Arc::new(ServiceTypeManager::new(uow.clone())),
            catalog: Arc::new(CatalogManager::new(uow.clone())),
            appointments: Arc::new(AppointmentManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn password_reset(&self) -> Arc<dyn PasswordResetService> {
        self.password_reset.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn barbershops(&self) -> Arc<dyn BarbershopService> {
        self.barbershops.clone()
    }

    fn service_types(&self) -> Arc<dyn ServiceTypeService> {
        self.service_types.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentService> {
        self.appointments.clone()
    }
}
