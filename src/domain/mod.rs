//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod appointment;
pub mod barber_service;
pub mod barbershop;
pub mod password;
pub mod service_type;
pub mod status;
pub mod token;
pub mod user;

pub use appointment::Appointment;
pub use barber_service::{BarberService, BarberServiceChanges, ServiceFilter};
pub use barbershop::{Barbershop, BarbershopChanges};
pub use password::PasswordDigest;
pub use service_type::ServiceType;
pub use status::EntityStatus;
pub use token::TokenUsage;
pub use user::{User, UserResponse, UserRole};
