#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;

use taskvault::auth::TokenService;
use taskvault::routes::{self, health};
use taskvault::store::MemoryStore;
use taskvault::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET, Duration::hours(1))
}

pub fn test_state() -> web::Data<AppState> {
    let store = Arc::new(MemoryStore::new());
    web::Data::new(AppState::new(store.clone(), store, test_tokens()))
}

/// Builds the same service tree as `main`, backed by a fresh in-memory store.
pub async fn test_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(test_state())
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

/// Sends a request and returns its status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    req: Request,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "Response body is not JSON. Status: {}. Body: {:?}",
            status,
            String::from_utf8_lossy(&body)
        )
    });
    (status, json)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register_user(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn login_user(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers and logs in a user, returning the bearer token.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    email: &str,
    password: &str,
) -> String {
    let (status, body) = register_user(app, email, password).await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed: {}", body);

    let (status, body) = login_user(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "Login failed: {}", body);

    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

pub async fn create_task(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    token: &str,
    payload: Value,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(token))
        .set_json(payload)
        .to_request();
    send(app, req).await
}
