/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts the bearer token from the Authorization
 * header, resolves it through the token issuer and attaches the user to the
 * request for handlers.
 *
 * # Failure responses
 *
 * Clients that want JSON get the `Unauthenticated` envelope. Everyone else
 * gets a plain-text `401 Unauthenticated.` with a `WWW-Authenticate: Bearer`
 * challenge, since there is no login page to redirect to.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, WWW_AUTHENTICATE},
        request::Parts,
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::backend::auth::sessions::hash_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    /// Digest of the presenting token, used by logout
    pub token_hash: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from `Authorization: Bearer <token>`
/// 2. Looks its digest up in the token store
/// 3. Attaches `AuthenticatedUser` to request extensions for use in handlers
///
/// Returns 401 if the token is missing, malformed, unknown, expired or revoked,
/// and 500 if the token store fails.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let wants_json = wants_json(request.headers());

    let Some(token) = bearer_token(request.headers()) else {
        tracing::warn!("Missing or malformed Authorization header on {}", request.uri().path());
        return unauthenticated(wants_json);
    };

    let token_hash = hash_token(token);
    let user_id = match app_state.tokens.verify_hash(&token_hash).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            tracing::warn!("Rejected unknown, expired or revoked token on {}", request.uri().path());
            return unauthenticated(wants_json);
        }
        Err(e) => return e.into_response(),
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id, token_hash });

    next.run(request).await
}

/// Extract the token from a `Bearer` Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Whether the client asked for a JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    let accepts_json = headers
        .get(ACCEPT)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|accept| accept.contains("/json") || accept.contains("+json"));
    let is_ajax = headers
        .get("x-requested-with")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"));

    accepts_json || is_ajax
}

fn unauthenticated(wants_json: bool) -> Response {
    if wants_json {
        return BackendError::Unauthenticated.into_response();
    }

    let mut response = (StatusCode::UNAUTHORIZED, "Unauthenticated.").into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers to get the user that the
/// auth middleware attached to the request.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::{TokenIssuer, TokenRecord};
    use crate::backend::routes::router::create_router;
    use crate::backend::store::{StoreError, TokenStore};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Token store that cannot reach its database
    struct UnavailableTokens;

    #[async_trait]
    impl TokenStore for UnavailableTokens {
        async fn insert_token(&self, _token: TokenRecord) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_hash(&self, _token_hash: &str) -> Result<Option<TokenRecord>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn mark_revoked(&self, _token_hash: &str) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers(&[("authorization", "Bearer abc123")])), Some("abc123"));
        assert_eq!(bearer_token(&headers(&[("authorization", "bearer abc123")])), Some("abc123"));
        assert_eq!(bearer_token(&headers(&[("authorization", "Basic abc123")])), None);
        assert_eq!(bearer_token(&headers(&[("authorization", "Bearer ")])), None);
        assert_eq!(bearer_token(&headers(&[("authorization", "abc123")])), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wants_json() {
        assert!(wants_json(&headers(&[("accept", "application/json")])));
        assert!(wants_json(&headers(&[("accept", "application/problem+json")])));
        assert!(wants_json(&headers(&[("x-requested-with", "XMLHttpRequest")])));
        assert!(!wants_json(&headers(&[("accept", "text/html")])));
        assert!(!wants_json(&HeaderMap::new()));
    }

    #[test]
    fn test_plain_unauthenticated_has_challenge() {
        let response = unauthenticated(false);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_unauthenticated() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert_matches!(result, Err(BackendError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_extractor_reads_extension() {
        let mut request = axum::http::Request::new(());
        let user_id = Uuid::new_v4();
        request.extensions_mut().insert(AuthenticatedUser {
            user_id,
            token_hash: hash_token("t"),
        });
        let (mut parts, _) = request.into_parts();

        let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.user_id, user_id);
    }

    #[tokio::test]
    async fn test_token_store_failure_is_server_error() {
        let mut state = AppState::in_memory(4, None);
        state.tokens = TokenIssuer::new(Arc::new(UnavailableTokens), None);
        let app = create_router(state);

        let request = axum::http::Request::builder()
            .uri("/api/user")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, "Bearer some-token")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "error": "Server error", "message": "An unexpected error occurred", "code": 500 })
        );
    }
}
