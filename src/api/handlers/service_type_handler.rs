//! Service type handlers. Listing is public; changes are admin only.

use axum::{
    extract::{Extension, Path, State},
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
use crate::api::middleware::{auth_middleware, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::ServiceType;
use crate::errors::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ServiceTypeRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Haircut")]
    pub title: String,
}

pub fn service_type_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_service_types).merge(post(create_service_type).route_layer(auth.clone())),
        )
        .route(
            "/:id",
            get(get_service_type).merge(
                put(update_service_type)
                    .delete(delete_service_type)
                    .route_layer(auth),
            ),
        )
}

#[utoipa::path(
    get,
    path = "/service-types",
    tag = "Service types",
    responses(
        (status = 200, description = "All service types", body = Vec<ServiceType>)
    )
)]
pub async fn list_service_types(State(state): State<AppState>) -> AppResult<Json<Vec<ServiceType>>> {
    Ok(Json(state.service_type_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/service-types/{id}",
    tag = "Service types",
    params(
        ("id" = Uuid, Path, description = "Service type ID")
    ),
    responses(
        (status = 200, description = "Service type", body = ServiceType),
        (status = 404, description = "Service type not found")
    )
)]
pub async fn get_service_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceType>> {
    Ok(Json(state.service_type_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/service-types",
    tag = "Service types",
    security(("bearer_auth" = [])),
    request_body = ServiceTypeRequest,
    responses(
        (status = 201, description = "Service type created", body = ServiceType),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_service_type(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ServiceTypeRequest>,
) -> AppResult<(StatusCode, Json<ServiceType>)> {
    require_admin(&current_user)?;
    let service_type = state.service_type_service.create(payload.title).await?;
    Ok((StatusCode::CREATED, Json(service_type)))
}

#[utoipa::path(
    put,
    path = "/service-types/{id}",
    tag = "Service types",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Service type ID")
    ),
    request_body = ServiceTypeRequest,
    responses(
        (status = 200, description = "Service type renamed", body = ServiceType),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Service type not found")
    )
)]
pub async fn update_service_type(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ServiceTypeRequest>,
) -> AppResult<Json<ServiceType>> {
    require_admin(&current_user)?;
    Ok(Json(state.service_type_service.rename(id, payload.title).await?))
}

#[utoipa::path(
    delete,
    path = "/service-types/{id}",
    tag = "Service types",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Service type ID")
    ),
    responses(
        (status = 200, description = "Deleted service type", body = ServiceType),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Service type not found")
    )
)]
pub async fn delete_service_type(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceType>> {
    require_admin(&current_user)?;
    Ok(Json(state.service_type_service.delete(id).await?))
}
