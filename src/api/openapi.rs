//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    appointment_handler, auth_handler, barbershop_handler, service_handler, service_type_handler,
    user_handler,
};
use crate::domain::{
    Appointment, BarberService, Barbershop, BarbershopChanges, EntityStatus, ServiceType,
    UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::{MessageResponse, PaginatedBarbershops, PaginationMeta};

/// OpenAPI documentation for the barbershop booking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Barbershop API",
        version = "0.1.0",
        description = "Barbershop booking backend: barbershops, services, appointments and accounts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3333", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::delete_user,
        barbershop_handler::create_barbershop,
        barbershop_handler::list_barbershops,
        barbershop_handler::get_barbershop,
        barbershop_handler::update_barbershop,
        barbershop_handler::delete_barbershop,
        service_type_handler::list_service_types,
        service_type_handler::get_service_type,
        service_type_handler::create_service_type,
        service_type_handler::update_service_type,
        service_type_handler::delete_service_type,
        service_handler::find_services,
        service_handler::get_service,
        service_handler::create_service,
        service_handler::update_service,
        service_handler::delete_service,
        appointment_handler::book_appointment,
        appointment_handler::list_appointments,
        appointment_handler::list_barbershop_appointments,
        appointment_handler::get_appointment,
        appointment_handler::update_appointment_status,
        appointment_handler::cancel_appointment,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            EntityStatus,
            Barbershop,
            BarbershopChanges,
            ServiceType,
            BarberService,
            Appointment,
            // Shared types
            TokenResponse,
            MessageResponse,
            PaginatedBarbershops,
            PaginationMeta,
            // Request bodies
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            barbershop_handler::BarbershopPayload,
            barbershop_handler::CreateBarbershopRequest,
            barbershop_handler::UpdateBarbershopRequest,
            service_type_handler::ServiceTypeRequest,
            service_handler::CreateServiceRequest,
            service_handler::UpdateServiceRequest,
            appointment_handler::BookAppointmentRequest,
            appointment_handler::AppointmentStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and password reset"),
        (name = "Users", description = "User accounts"),
        (name = "Barbershops", description = "Barbershop profiles"),
        (name = "Service types", description = "Kinds of service (admin managed)"),
        (name = "Services", description = "Priced services offered by barbershops"),
        (name = "Appointments", description = "Bookings")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Client token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
