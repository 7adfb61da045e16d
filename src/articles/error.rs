//! Outward-facing failures of article operations.

use thiserror::Error;

use crate::validation::FieldError;

/// Which path parameter failed identifier validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResource {
    Article,
    User,
}

impl PathResource {
    fn noun(self) -> &'static str {
        match self {
            PathResource::Article => "artículo",
            PathResource::User => "usuario",
        }
    }
}

/// Terminal outcome of a failed gateway operation.
///
/// Upstream causes are logged where they occur and are not carried here:
/// clients see the same error for a timeout, a 5xx and a refused connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A path identifier is not a UUID v4.
    #[error("El identificador del {} no es un UUID.", .0.noun())]
    InvalidId(PathResource),

    /// The payload failed field validation.
    #[error(transparent)]
    InvalidPayload(#[from] FieldError),

    /// The body is not a JSON object.
    #[error("El cuerpo de la petición no es un objeto JSON válido.")]
    MalformedBody,

    /// The body exceeds the configured size limit.
    #[error("El cuerpo de la petición es demasiado grande.")]
    BodyTooLarge,

    /// The referenced article or user does not exist, or could not be read.
    #[error("resource not found")]
    NotFound,

    /// A write or listing failed after existence was confirmed.
    #[error("upstream operation failed")]
    Upstream,
}

/// Result type for article operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
