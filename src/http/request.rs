//! Request handling.
//!
//! # Responsibilities
//! - Turn the request body into a JSON object payload
//! - Provide the request span carrying the request ID
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An empty body is an empty payload; content type is not required
//! - Body parsing happens before any handler logic runs

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{HeaderName, StatusCode},
};
use serde_json::{Map, Value};
use tracing::Span;

use crate::articles::GatewayError;

/// Header carrying the per-request identifier.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// A request body parsed as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(pub Map<String, Value>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                GatewayError::BodyTooLarge
            } else {
                GatewayError::MalformedBody
            }
        })?;
        parse_payload(&bytes).map(Payload)
    }
}

fn parse_payload(bytes: &[u8]) -> Result<Map<String, Value>, GatewayError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GatewayError::MalformedBody),
        Err(e) => {
            tracing::debug!(error = %e, "Request body is not JSON");
            Err(GatewayError::MalformedBody)
        }
    }
}

/// Span for one inbound request, tagged with its request ID.
pub fn request_span(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_payload() {
        assert_eq!(parse_payload(b"").unwrap(), Map::new());
        assert_eq!(parse_payload(b" \n\t").unwrap(), Map::new());
    }

    #[test]
    fn test_object_body() {
        let map = parse_payload(br#"{"titulo":"Hola"}"#).unwrap();
        assert_eq!(Value::Object(map), json!({ "titulo": "Hola" }));
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert_eq!(parse_payload(b"[1,2]").unwrap_err(), GatewayError::MalformedBody);
        assert_eq!(parse_payload(b"\"text\"").unwrap_err(), GatewayError::MalformedBody);
        assert_eq!(parse_payload(b"null").unwrap_err(), GatewayError::MalformedBody);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert_eq!(parse_payload(b"{titulo:").unwrap_err(), GatewayError::MalformedBody);
    }

    #[tokio::test]
    async fn test_extractor_reads_body() {
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"contenido":"x"}"#))
            .unwrap();
        let Payload(map) = Payload::from_request(req, &()).await.unwrap();
        assert_eq!(map.get("contenido"), Some(&json!("x")));
    }
}
