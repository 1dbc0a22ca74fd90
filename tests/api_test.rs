//! Integration tests for API endpoints.
//!
//! The router runs with the real services over in-memory repositories, so
//! no database or mail provider is needed.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use barbershop_api::api::create_router;
use barbershop_api::domain::{ServiceType, TokenUsage, UserRole};
use barbershop_api::infra::ServiceTypeRepository;
use barbershop_api::services::{JwtSigner, TokenService};

use common::{app_state, sha256_hex, signer, user_with_password, MemoryUnitOfWork};

struct TestApp {
    router: Router,
    uow: Arc<MemoryUnitOfWork>,
    tokens: Arc<JwtSigner>,
}

impl TestApp {
    fn new() -> Self {
        let uow = Arc::new(MemoryUnitOfWork::new());
        let tokens = signer();
        let router = create_router(app_state(uow.clone(), tokens.clone()));
        Self { router, uow, tokens }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Register through the API and log in, returning the client token
    async fn register_and_login(&self, email: &str) -> String {
        let (status, _) = self
            .send(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({ "email": email, "name": "Client", "password": sha256_hex("secret") })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": sha256_hex("secret") })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

// =============================================================================
// Root & Health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let app = TestApp::new();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    assert!(String::from_utf8_lossy(&bytes).contains("barbershop"));
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_rejects_plain_password() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "client@example.com", "name": "Client", "password": "hunter2" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PASSWORD_FORMAT");
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let app = TestApp::new();
    app.register_and_login("client@example.com").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": "client@example.com", "name": "Again", "password": sha256_hex("x") })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.register_and_login("client@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "client@example.com", "password": sha256_hex("wrong") })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_forgot_password_is_accepted_for_any_email() {
    let app = TestApp::new();
    app.uow
        .seed_user(user_with_password("known@example.com", "secret"));

    for email in ["known@example.com", "unknown@example.com"] {
        let (status, body) = app
            .send(
                Method::POST,
                "/auth/forgot-password",
                None,
                Some(json!({ "email": email })),
            )
            .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_reset_password_over_http() {
    let app = TestApp::new();
    let user = app
        .uow
        .seed_user(user_with_password("u1@example.com", "old password"));
    let reset = app.tokens.issue(user.id, TokenUsage::ResetPassword).unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/reset-password",
            None,
            Some(json!({ "token": reset, "new_password": sha256_hex("new password") })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let claims = app.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.usage, TokenUsage::Client);
}

#[tokio::test]
async fn test_reset_password_with_client_token_is_forbidden() {
    let app = TestApp::new();
    let user = app
        .uow
        .seed_user(user_with_password("u1@example.com", "old password"));
    let client = app.tokens.issue(user.id, TokenUsage::Client).unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/reset-password",
            None,
            Some(json!({ "token": client, "new_password": sha256_hex("new password") })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED_TOKEN_USAGE");
    assert_eq!(app.uow.users.save_count(), 0);
}

// =============================================================================
// Protected routes
// =============================================================================

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let (status, _) = app.send(Method::GET, "/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, "/users/me", Some("not-a-jwt"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_reset_token_cannot_open_protected_routes() {
    let app = TestApp::new();
    let user = app
        .uow
        .seed_user(user_with_password("u1@example.com", "secret"));
    let reset = app.tokens.issue(user.id, TokenUsage::ResetPassword).unwrap();

    let (status, _) = app
        .send(Method::GET, "/users/me", Some(&reset), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_current_user_profile() {
    let app = TestApp::new();
    let token = app.register_and_login("client@example.com").await;

    let (status, body) = app.send(Method::GET, "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "client@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_listing_users_is_admin_only() {
    let app = TestApp::new();
    let token = app.register_and_login("client@example.com").await;

    let (status, _) = app.send(Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut admin = user_with_password("admin@example.com", "secret");
    admin.role = UserRole::Admin;
    let admin = app.uow.seed_user(admin);
    let admin_token = app.tokens.issue(admin.id, TokenUsage::Client).unwrap();

    let (status, body) = app
        .send(Method::GET, "/users", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleted_account_token_stops_working() {
    let app = TestApp::new();
    let token = app.register_and_login("client@example.com").await;
    let (_, me) = app.send(Method::GET, "/users/me", Some(&token), None).await;
    let id = me["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(Method::DELETE, &format!("/users/{}", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    let (status, _) = app.send(Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Barbershops, services and appointments
// =============================================================================

#[tokio::test]
async fn test_booking_flow() {
    let app = TestApp::new();
    let haircut = app
        .uow
        .service_types
        .save(ServiceType::new("Haircut".into()))
        .await
        .unwrap();
    let owner = app.register_and_login("owner@example.com").await;
    let client = app.register_and_login("client@example.com").await;

    // Writes need a token, reads do not
    let (status, _) = app
        .send(
            Method::POST,
            "/barbershops",
            None,
            Some(json!({ "barbershop": { "name": "Fade Factory", "address": "12 Main Street" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, shop) = app
        .send(
            Method::POST,
            "/barbershops",
            Some(&owner),
            Some(json!({ "barbershop": { "name": "Fade Factory", "address": "12 Main Street" } })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let shop_id = shop["id"].as_str().unwrap().to_string();

    let (status, page) = app.send(Method::GET, "/barbershops", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);

    let (status, service) = app
        .send(
            Method::POST,
            "/services",
            Some(&owner),
            Some(json!({ "service_type_id": haircut.id, "title": "Classic cut", "price": 2500 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = service["id"].as_str().unwrap().to_string();

    let (status, found) = app
        .send(
            Method::GET,
            &format!("/services?barbershopId={}&priceMax=3000", shop_id),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    // A client cannot change someone else's shop
    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/barbershops/{}", shop_id),
            Some(&client),
            Some(json!({ "barbershop": { "name": "Mine now" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, appointment) = app
        .send(
            Method::POST,
            "/appointments",
            Some(&client),
            Some(json!({ "service_id": service_id, "date": "2099-01-15T14:30:00Z" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appointment["barbershop_id"], shop["id"]);

    let (status, incoming) = app
        .send(Method::GET, "/appointments/barbershop", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(incoming.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_finder_with_unknown_barbershop_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::GET,
            "/services?barbershopId=00000000-0000-0000-0000-000000000001",
            None,
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_reset_password_with_empty_token_is_invalid_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/reset-password",
            None,
            Some(json!({ "token": "", "new_password": sha256_hex("new password") })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_second_barbershop_for_owner_is_conflict() {
    let app = TestApp::new();
    let owner = app.register_and_login("owner@example.com").await;
    let shop = json!({ "barbershop": { "name": "Fade Factory", "address": "12 Main Street" } });

    let (status, _) = app
        .send(Method::POST, "/barbershops", Some(&owner), Some(shop.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(Method::POST, "/barbershops", Some(&owner), Some(shop))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "User already has a barbershop");
}
