/**
 * JSON Payload Extractor
 *
 * Reads the request body as a raw JSON object for the validator. Unlike
 * `axum::Json<T>`, it never rejects a body for missing or mistyped fields;
 * that is the validator's job, so field problems always come back as a 422
 * envelope.
 *
 * - empty body -> empty object
 * - malformed JSON or a non-object -> `BackendError::BadRequest`
 */

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::backend::error::BackendError;

/// Raw JSON object body
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Map<String, Value>);

impl JsonPayload {
    /// Parse a request body
    pub fn parse(bytes: &[u8]) -> Result<Self, BackendError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(BackendError::bad_request("Request body must be a JSON object")),
            Err(e) => Err(BackendError::bad_request(format!("Malformed JSON body: {e}"))),
        }
    }
}

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|e| BackendError::bad_request(e.body_text()))?;

        Self::parse(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert!(JsonPayload::parse(b"").unwrap().0.is_empty());
        assert!(JsonPayload::parse(b"  \n").unwrap().0.is_empty());
    }

    #[test]
    fn test_object_body() {
        let payload = JsonPayload::parse(br#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(payload.0["email"], "a@x.com");
    }

    #[test]
    fn test_non_object_body() {
        assert_matches!(JsonPayload::parse(b"[1,2]"), Err(BackendError::BadRequest { .. }));
    }

    #[test]
    fn test_malformed_body() {
        assert_matches!(JsonPayload::parse(b"{\"email\":"), Err(BackendError::BadRequest { .. }));
    }
}
