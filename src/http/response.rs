//! Response handling.
//!
//! # Responsibilities
//! - Map gateway errors to HTTP status codes
//!
//! # Design Decisions
//! - Client errors other than 404 carry `{"error": message}` so callers can show the field at fault
//! - 404 and 500 carry no body; upstream causes are never leaked to clients

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::articles::GatewayError;

impl GatewayError {
    /// Status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidId(_)
            | GatewayError::InvalidPayload(_)
            | GatewayError::MalformedBody => StatusCode::BAD_REQUEST,
            GatewayError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            GatewayError::NotFound | GatewayError::Upstream => status.into_response(),
            _ => (status, Json(json!({ "error": self.to_string() }))).into_response(),
        }
    }
}
