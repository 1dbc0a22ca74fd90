//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod appointment;
pub mod barber_service;
pub mod barbershop;
pub mod service_type;
pub mod user;
