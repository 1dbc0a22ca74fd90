//! Appointment handlers. Every route requires authentication.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Appointment, EntityStatus};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookAppointmentRequest {
    pub service_id: Uuid,
    /// Must be in the future
    #[schema(example = "2030-01-15T14:30:00Z")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AppointmentStatusRequest {
    /// `enabled` to confirm, `disabled` to suspend
    pub status: EntityStatus,
}

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(book_appointment))
        .route("/barbershop", get(list_barbershop_appointments))
        .route("/:id", get(get_appointment).delete(cancel_appointment))
        .route("/:id/status", put(update_appointment_status))
}

/// Book an appointment
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Date in the past or unknown service"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn book_appointment(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BookAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let appointment = state
        .appointment_service
        .book(current_user.id, payload.service_id, payload.date)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Appointments booked by the caller
#[utoipa::path(
    get,
    path = "/appointments",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's appointments", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_appointments(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(
        state.appointment_service.list_for_client(current_user.id).await?,
    ))
}

/// Appointments at the caller's barbershop
#[utoipa::path(
    get,
    path = "/appointments/barbershop",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Appointments at the caller's barbershop", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_barbershop_appointments(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Appointment>>> {
    Ok(Json(
        state.appointment_service.list_for_owner(current_user.id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 403, description = "Caller is neither the client nor the barbershop owner"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointment_service.get(current_user.id, id).await?))
}

/// Confirm or suspend an appointment (barbershop owner)
#[utoipa::path(
    put,
    path = "/appointments/{id}/status",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    request_body = AppointmentStatusRequest,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Status must be enabled or disabled"),
        (status = 401, description = "Not the owner of the barbershop"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn update_appointment_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AppointmentStatusRequest>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .appointment_service
        .set_status(current_user.id, id, payload.status)
        .await?;

    Ok(Json(appointment))
}

/// Cancel an appointment (client or barbershop owner)
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Appointment ID")
    ),
    responses(
        (status = 200, description = "Cancelled appointment", body = Appointment),
        (status = 403, description = "Caller is neither the client nor the barbershop owner"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn cancel_appointment(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(
        state.appointment_service.cancel(current_user.id, id).await?,
    ))
}
