//! API layer - HTTP surface of the booking backend
//!
//! Public routes cover sign-up, login, password recovery and browsing
//! barbershops and their services. Everything that changes data on behalf
//! of a user goes through the bearer token middleware.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
