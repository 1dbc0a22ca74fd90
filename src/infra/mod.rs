//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Outbound email delivery
//! - Unit of Work for repository access

pub mod db;
pub mod mailer;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use mailer::{LogMailer, MailData, MailStatus, Mailer, SendGridMailer, SendMailResult};
pub use repositories::{
    AppointmentRepository, BarberServiceRepository, BarbershopRepository, ServiceTypeRepository,
    UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAppointmentRepository, MockBarberServiceRepository, MockBarbershopRepository,
    MockServiceTypeRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
