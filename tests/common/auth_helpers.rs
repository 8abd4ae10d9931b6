//! Authentication test helpers
//!
//! Provides utilities for registering test users and logging them in.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::app::{TestApp, TestResponse};

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Default test password (meets the minimum length)
pub const TEST_PASSWORD: &str = "test_password_123";

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// POST /api/register
pub async fn register(app: &TestApp, name: &str, email: &str, password: &str) -> TestResponse {
    app.post(
        "/api/register",
        None,
        &json!({ "name": name, "email": email, "password": password }),
    )
    .await
}

/// POST /api/login
pub async fn login(app: &TestApp, email: &str, password: &str) -> TestResponse {
    app.post("/api/login", None, &json!({ "email": email, "password": password }))
        .await
}

/// Log in and return the issued token
pub async fn login_token(app: &TestApp, email: &str, password: &str) -> String {
    let response = login(app, email, password).await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.text());
    response.json()["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}

/// Register a user with a unique email and log them in
pub async fn create_test_user(app: &TestApp) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    let name = "Test User".to_string();

    let response = register(app, &name, &email, TEST_PASSWORD).await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "registration failed: {}",
        response.text()
    );

    let token = login_token(app, &email, TEST_PASSWORD).await;
    TestUser {
        name,
        email,
        password: TEST_PASSWORD.to_string(),
        token,
    }
}
