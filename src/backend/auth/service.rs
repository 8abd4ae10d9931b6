/**
 * Authentication Service
 *
 * Orchestrates registration and login on top of the credential store, the
 * password hasher and the token issuer. Handlers stay thin: they pass the raw
 * payload in and turn the result into a response.
 *
 * # Registration
 *
 * Received -> Validated -> UniquenessChecked -> Hashed -> Persisted -> Done
 *
 * Uniqueness is checked twice: once as a validation rule (so the client sees
 * it next to the other field errors) and once by the store's unique
 * constraint at insert time, which settles concurrent registrations.
 *
 * # Login
 *
 * Unknown email and wrong password produce the same `InvalidCredentials`
 * error, and both paths pay for one bcrypt operation.
 */

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::backend::auth::handlers::types::{LoginInput, RegisterInput};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::{normalize_email, NewUser, UniqueEmail, User};
use crate::backend::error::BackendError;
use crate::backend::store::CredentialStore;
use crate::backend::validation::{Rule, Validator};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: f64 = 8.0;

/// Progress of a registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Received,
    /// Presence, type and format rules passed
    Validated,
    /// The `unique` email rule passed. It runs inside the same validation
    /// call, so this stage is entered together with `Validated`.
    UniquenessChecked,
    Hashed,
    Persisted,
    Done,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::UniquenessChecked => "uniqueness checked",
            Self::Hashed => "hashed",
            Self::Persisted => "persisted",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Tracks and logs the stage a registration has reached
struct Registration {
    stage: RegistrationStage,
}

impl Registration {
    fn start() -> Self {
        tracing::debug!("Registration {}", RegistrationStage::Received);
        Self {
            stage: RegistrationStage::Received,
        }
    }

    fn advance(&mut self, next: RegistrationStage) {
        tracing::debug!("Registration {} -> {}", self.stage, next);
        self.stage = next;
    }

    /// Log a failure at the current stage and pass the error through
    fn fail(&self, error: BackendError) -> BackendError {
        if error.is_internal() {
            tracing::error!("Registration failed after stage '{}': {}", self.stage, error);
        } else {
            tracing::warn!("Registration rejected after stage '{}': {}", self.stage, error);
        }
        error
    }
}

/// Registration, login and logout
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    fn registration_rules(&self) -> Validator {
        Validator::new()
            .field("name", [Rule::Required, Rule::String])
            .field(
                "email",
                [
                    Rule::Required,
                    Rule::String,
                    Rule::Email,
                    Rule::Unique(Arc::new(UniqueEmail(self.users.clone()))),
                ],
            )
            .field(
                "password",
                [
                    Rule::Required,
                    Rule::String,
                    Rule::Verbatim,
                    Rule::Min(MIN_PASSWORD_LENGTH),
                ],
            )
    }

    fn login_rules() -> Validator {
        Validator::new()
            .field("email", [Rule::Required, Rule::String, Rule::Email])
            .field("password", [Rule::Required, Rule::String, Rule::Verbatim])
    }

    /// Register a new user from a raw request payload
    pub async fn register(&self, payload: &Map<String, Value>) -> Result<User, BackendError> {
        let mut registration = Registration::start();

        let input: RegisterInput = self
            .registration_rules()
            .validate_into(payload)
            .await
            .map_err(|e| registration.fail(e))?;
        registration.advance(RegistrationStage::Validated);
        registration.advance(RegistrationStage::UniquenessChecked);

        let hasher = self.hasher.clone();
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(BackendError::from)
            .and_then(|hashed| hashed)
            .map_err(|e| registration.fail(e))?;
        registration.advance(RegistrationStage::Hashed);

        let user = self
            .users
            .insert_user(NewUser {
                name: input.name,
                email: normalize_email(&input.email),
                password_hash,
            })
            .await
            .map_err(|e| registration.fail(e.into()))?;
        registration.advance(RegistrationStage::Persisted);

        tracing::info!("User created successfully: {} ({})", user.id, user.email);
        registration.advance(RegistrationStage::Done);
        Ok(user)
    }

    /// Check credentials and issue a bearer token
    pub async fn login(&self, payload: &Map<String, Value>) -> Result<String, BackendError> {
        let input: LoginInput = Self::login_rules().validate_into(payload).await?;
        let email = normalize_email(&input.email);

        let user = self.users.find_by_email(&email).await?;

        let hasher = self.hasher.clone();
        let password = input.password;
        let digest = user.as_ref().map(|user| user.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&password, &digest),
            None => {
                // equalize timing with the found-user path
                let _ = hasher.hash(&password);
                false
            }
        })
        .await?;

        let user = match user {
            Some(user) if valid => user,
            Some(_) => {
                tracing::warn!("Invalid password for user: {}", email);
                return Err(BackendError::InvalidCredentials);
            }
            None => {
                tracing::warn!("Login for unknown email: {}", email);
                return Err(BackendError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(user.id).await?;
        tracing::info!("User logged in successfully: {} ({})", user.id, user.email);
        Ok(token)
    }

    /// Revoke the token that authenticated the current request
    pub async fn logout(&self, user_id: Uuid, token_hash: &str) -> Result<(), BackendError> {
        self.tokens.revoke_hash(token_hash).await?;
        tracing::info!("User logged out: {}", user_id);
        Ok(())
    }

    /// Load the authenticated user's record
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, BackendError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Authenticated user no longer exists: {}", user_id);
                BackendError::not_found("User")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::BcryptHasher;
    use crate::backend::store::{MemoryStore, StoreError};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    fn service() -> AuthService {
        let store = Arc::new(MemoryStore::new());
        AuthService::new(
            store.clone(),
            Arc::new(BcryptHasher::new(4)),
            TokenIssuer::new(store, None),
        )
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn maria() -> Map<String, Value> {
        object(json!({
            "name": "Maria Eduarda",
            "email": "Maria.Eduarda@Example.com",
            "password": "password123"
        }))
    }

    #[tokio::test]
    async fn test_register_stores_hash_and_normalized_email() {
        let service = service();
        let user = service.register(&maria()).await.unwrap();

        assert_eq!(user.email, "maria.eduarda@example.com");
        assert_eq!(user.name, "Maria Eduarda");
        assert_ne!(user.password_hash, "password123");
        assert!(BcryptHasher::new(4).verify("password123", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_twice_fails_on_email() {
        let service = service();
        service.register(&maria()).await.unwrap();

        let second = service.register(&maria()).await;
        assert_matches!(second, Err(BackendError::Validation(errors)) => {
            assert_eq!(
                errors.messages("email"),
                Some(&["The email has already been taken.".to_string()][..])
            );
        });
    }

    #[tokio::test]
    async fn test_concurrent_registration_has_one_winner() {
        let service = service();
        let (first_payload, second_payload) = (maria(), maria());
        let (first, second) = tokio::join!(
            service.register(&first_payload),
            service.register(&second_payload)
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(BackendError::Validation(errors)) if errors.messages("email").is_some())));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user() {
        let service = service();
        let user = service.register(&maria()).await.unwrap();

        let token = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "password123" })))
            .await
            .unwrap();

        assert_eq!(service.tokens().verify(&token).await.unwrap(), Some(user.id));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service();
        service.register(&maria()).await.unwrap();

        let wrong_password = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "wrong-password" })))
            .await;
        let unknown_email = service
            .login(&object(json!({ "email": "nobody@example.com", "password": "password123" })))
            .await;

        assert_matches!(wrong_password, Err(BackendError::InvalidCredentials));
        assert_matches!(unknown_email, Err(BackendError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_validates_shape() {
        let service = service();
        let result = service.login(&object(json!({ "email": "not-an-email" }))).await;

        assert_matches!(result, Err(BackendError::Validation(errors)) => {
            assert!(errors.messages("email").is_some());
            assert!(errors.messages("password").is_some());
        });
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let service = service();
        let user = service.register(&maria()).await.unwrap();
        let token = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "password123" })))
            .await
            .unwrap();

        service
            .logout(user.id, &crate::backend::auth::sessions::hash_token(&token))
            .await
            .unwrap();
        assert_eq!(service.tokens().verify(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_password_whitespace_is_significant() {
        let service = service();
        let mut payload = maria();
        payload.insert("password".to_string(), json!(" password123 "));
        service.register(&payload).await.unwrap();

        let trimmed = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "password123" })))
            .await;
        assert_matches!(trimmed, Err(BackendError::InvalidCredentials));

        let exact = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": " password123 " })))
            .await;
        assert!(exact.is_ok());
    }

    #[tokio::test]
    async fn test_password_length_counts_surrounding_whitespace() {
        let service = service();
        let mut payload = maria();
        payload.insert("password".to_string(), json!("abcdefg "));
        let user = service.register(&payload).await.unwrap();
        assert!(BcryptHasher::new(4).verify("abcdefg ", &user.password_hash));

        let trimmed = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "abcdefg" })))
            .await;
        assert_matches!(trimmed, Err(BackendError::InvalidCredentials));

        let exact = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "abcdefg " })))
            .await;
        assert!(exact.is_ok());
    }

    /// Credential store whose every query fails
    struct UnavailableUsers;

    #[async_trait]
    impl CredentialStore for UnavailableUsers {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn insert_user(&self, _user: NewUser) -> Result<User, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_store_failure_on_insert_is_internal_and_hidden() {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(
            Arc::new(UnavailableUsers),
            Arc::new(BcryptHasher::new(4)),
            TokenIssuer::new(store, None),
        );

        let error = service.register(&maria()).await.unwrap_err();
        assert_matches!(&error, BackendError::Internal { .. });

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "error": "Server error", "message": "An unexpected error occurred", "code": 500 })
        );
        let text = body.to_string();
        assert!(!text.contains("pool timed out"));
        assert!(!text.contains("database error"));
    }

    #[tokio::test]
    async fn test_store_failure_on_login_is_internal() {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(
            Arc::new(UnavailableUsers),
            Arc::new(BcryptHasher::new(4)),
            TokenIssuer::new(store, None),
        );

        let result = service
            .login(&object(json!({ "email": "maria.eduarda@example.com", "password": "password123" })))
            .await;
        assert_matches!(result, Err(BackendError::Internal { .. }));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(RegistrationStage::UniquenessChecked.to_string(), "uniqueness checked");
    }
}
