//! Barber service handlers: the public finder plus owner-only changes.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{BarberService, BarberServiceChanges, ServiceFilter};
use crate::errors::{AppError, AppResult};
use crate::services::NewBarberService;

/// Finder query. Values are kept as text so that unparseable prices can be
/// ignored instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ServiceQuery {
    /// Only services of this barbershop
    pub barbershop_id: Option<String>,
    /// Only services of this type
    pub service_type_id: Option<String>,
    /// Inclusive lower price bound in minor units; 0 means none
    pub price_min: Option<String>,
    /// Inclusive upper price bound in minor units; 0 means none
    pub price_max: Option<String>,
}

impl ServiceQuery {
    fn into_filter(self) -> AppResult<ServiceFilter> {
        Ok(ServiceFilter {
            barbershop_id: parse_id(self.barbershop_id, "barbershop")?,
            service_type_id: parse_id(self.service_type_id, "service type")?,
            price_min: parse_price(self.price_min),
            price_max: parse_price(self.price_max),
        })
    }
}

fn parse_id(raw: Option<String>, entity: &str) -> AppResult<Option<Uuid>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value).map(Some).map_err(|_| {
            AppError::bad_request(format!("Provided {} {} does not exist", entity, value))
        }),
    }
}

fn parse_price(raw: Option<String>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    pub service_type_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Classic cut")]
    pub title: String,
    /// Price in minor currency units
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 2500)]
    pub price: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    pub service_type_id: Option<Uuid>,
    pub title: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,
}

impl From<UpdateServiceRequest> for BarberServiceChanges {
    fn from(request: UpdateServiceRequest) -> Self {
        Self {
            title: request.title,
            price: request.price,
            service_type_id: request.service_type_id,
        }
    }
}

pub fn service_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(find_services).merge(post(create_service).route_layer(auth.clone())),
        )
        .route(
            "/:id",
            get(get_service).merge(put(update_service).delete(delete_service).route_layer(auth)),
        )
}

/// Find services by barbershop, type and price range
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    params(ServiceQuery),
    responses(
        (status = 200, description = "Matching services, cheapest first", body = Vec<BarberService>),
        (status = 400, description = "Referenced barbershop or service type does not exist")
    )
)]
pub async fn find_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> AppResult<Json<Vec<BarberService>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.catalog_service.search(filter).await?))
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Services",
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service", body = BarberService),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BarberService>> {
    Ok(Json(state.catalog_service.get(id).await?))
}

/// Offer a service at the caller's barbershop
#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = BarberService),
        (status = 400, description = "Caller has no barbershop or the service type does not exist"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<BarberService>)> {
    let service = state
        .catalog_service
        .create(
            current_user.id,
            NewBarberService {
                service_type_id: payload.service_type_id,
                title: payload.title,
                price: payload.price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated service", body = BarberService),
        (status = 401, description = "Not the owner of the providing barbershop"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn update_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> AppResult<Json<BarberService>> {
    let service = state
        .catalog_service
        .update(current_user.id, id, payload.into())
        .await?;

    Ok(Json(service))
}

#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "Services",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Deleted service", body = BarberService),
        (status = 401, description = "Not the owner of the providing barbershop"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn delete_service(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BarberService>> {
    Ok(Json(state.catalog_service.delete(current_user.id, id).await?))
}
