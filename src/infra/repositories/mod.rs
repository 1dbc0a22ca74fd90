//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Every lookup applies the same soft-delete predicate from [`status`].

mod appointment_repository;
mod barber_service_repository;
mod barbershop_repository;
pub(crate) mod entities;
mod service_type_repository;
mod status;
mod user_repository;

pub use appointment_repository::{AppointmentRepository, AppointmentStore};
pub use barber_service_repository::{BarberServiceRepository, BarberServiceStore};
pub use barbershop_repository::{BarbershopRepository, BarbershopStore};
pub use service_type_repository::{ServiceTypeRepository, ServiceTypeStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use appointment_repository::MockAppointmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use barber_service_repository::MockBarberServiceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use barbershop_repository::MockBarbershopRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_type_repository::MockServiceTypeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
