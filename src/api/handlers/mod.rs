//! HTTP request handlers.

pub mod appointment_handler;
pub mod auth_handler;
pub mod barbershop_handler;
pub mod service_handler;
pub mod service_type_handler;
pub mod user_handler;

pub use appointment_handler::appointment_routes;
pub use auth_handler::auth_routes;
pub use barbershop_handler::barbershop_routes;
pub use service_handler::service_routes;
pub use service_type_handler::service_type_routes;
pub use user_handler::user_routes;
