//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod appointment_service;
mod auth_service;
mod barbershop_service;
mod catalog_service;
pub mod container;
mod password_reset_service;
mod service_type_service;
mod token_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use appointment_service::{AppointmentManager, AppointmentService};
pub use auth_service::{AuthService, Authenticator};
pub use barbershop_service::{BarbershopManager, BarbershopService, NewBarbershop};
pub use catalog_service::{CatalogManager, CatalogService, NewBarberService};
pub use password_reset_service::{
    PasswordResetService, PasswordResetter, ResetMailSettings, ResetPassword,
};
pub use service_type_service::{ServiceTypeManager, ServiceTypeService};
pub use token_service::{Claims, JwtSigner, TokenResponse, TokenService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
