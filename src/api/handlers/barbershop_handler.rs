//! Barbershop profile handlers.
//!
//! Reading is public; creating, updating and deleting require a token and
//! only ever touch the caller's own barbershop.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{Barbershop, BarbershopChanges};
use crate::errors::AppResult;
use crate::services::NewBarbershop;
use crate::types::{Paginated, PaginatedBarbershops, PaginationParams};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BarbershopPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Fade Factory")]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 Main Street")]
    pub address: String,
}

/// Barbershop creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBarbershopRequest {
    #[validate(nested)]
    pub barbershop: BarbershopPayload,
}

/// Barbershop update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBarbershopRequest {
    pub barbershop: BarbershopChanges,
}

/// Create barbershop routes
pub fn barbershop_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_barbershops).merge(post(create_barbershop).route_layer(auth.clone())),
        )
        .route(
            "/:id",
            get(get_barbershop).merge(
                put(update_barbershop)
                    .delete(delete_barbershop)
                    .route_layer(auth),
            ),
        )
}

/// Open a barbershop owned by the caller
#[utoipa::path(
    post,
    path = "/barbershops",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    request_body = CreateBarbershopRequest,
    responses(
        (status = 201, description = "Barbershop created", body = Barbershop),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "User already has a barbershop")
    )
)]
pub async fn create_barbershop(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBarbershopRequest>,
) -> AppResult<(StatusCode, Json<Barbershop>)> {
    let barbershop = state
        .barbershop_service
        .create(
            current_user.id,
            NewBarbershop {
                name: payload.barbershop.name,
                address: payload.barbershop.address,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(barbershop)))
}

/// List barbershops
#[utoipa::path(
    get,
    path = "/barbershops",
    tag = "Barbershops",
    params(PaginationParams),
    responses(
        (status = 200, description = "A page of barbershops", body = PaginatedBarbershops)
    )
)]
pub async fn list_barbershops(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Barbershop>>> {
    Ok(Json(state.barbershop_service.list(params).await?))
}

/// Get a barbershop
#[utoipa::path(
    get,
    path = "/barbershops/{id}",
    tag = "Barbershops",
    params(
        ("id" = Uuid, Path, description = "Barbershop ID")
    ),
    responses(
        (status = 200, description = "Barbershop profile", body = Barbershop),
        (status = 404, description = "Barbershop not found")
    )
)]
pub async fn get_barbershop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Barbershop>> {
    Ok(Json(state.barbershop_service.get(id).await?))
}

/// Update the caller's barbershop
#[utoipa::path(
    put,
    path = "/barbershops/{id}",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Barbershop ID")
    ),
    request_body = UpdateBarbershopRequest,
    responses(
        (status = 200, description = "Updated barbershop", body = Barbershop),
        (status = 401, description = "Not the owner of this barbershop"),
        (status = 404, description = "Barbershop not found")
    )
)]
pub async fn update_barbershop(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBarbershopRequest>,
) -> AppResult<Json<Barbershop>> {
    let barbershop = state
        .barbershop_service
        .update(current_user.id, id, payload.barbershop)
        .await?;

    Ok(Json(barbershop))
}

/// Delete the caller's barbershop
#[utoipa::path(
    delete,
    path = "/barbershops/{id}",
    tag = "Barbershops",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Barbershop ID")
    ),
    responses(
        (status = 200, description = "Deleted barbershop", body = Barbershop),
        (status = 401, description = "Not the owner of this barbershop"),
        (status = 404, description = "Barbershop not found")
    )
)]
pub async fn delete_barbershop(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Barbershop>> {
    Ok(Json(
        state.barbershop_service.delete(current_user.id, id).await?,
    ))
}
