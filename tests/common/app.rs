//! In-memory test application
//!
//! Builds the real router over `AppState::in_memory` and sends requests to it
//! without binding a socket.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use restaurant_api::backend::routes::create_router;
use restaurant_api::backend::server::AppState;

/// Lowest bcrypt cost, to keep tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response body is not JSON ({e}): {}", self.text()))
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Test application over a fresh in-memory store
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_token_ttl(None)
    }

    pub fn with_token_ttl(ttl: Option<Duration>) -> Self {
        Self {
            router: create_router(AppState::in_memory(TEST_BCRYPT_COST, ttl)),
        }
    }

    /// Send a request with explicit headers and a raw body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: impl Into<Body>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(body.into()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a JSON API request the way an API client would
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let auth = token.map(crate::common::auth_header);
        let mut headers = vec![(header::ACCEPT.as_str(), "application/json")];
        if let Some(auth) = auth.as_deref() {
            headers.push((header::AUTHORIZATION.as_str(), auth));
        }

        match body {
            Some(body) => {
                headers.push((header::CONTENT_TYPE.as_str(), "application/json"));
                self.send(method, uri, &headers, body.to_string()).await
            }
            None => self.send(method, uri, &headers, Body::empty()).await,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
