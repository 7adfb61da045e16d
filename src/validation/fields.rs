//! Article payload validation.
//!
//! Two modes share one error type:
//! - creation: every article field must be present; missing fields are all
//!   reported together
//! - partial update: only article fields may appear; the first violation wins
//!
//! Validators are pure and consult no external state.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::validation::{is_valid_date_shape, is_valid_identifier};

/// Wire name of the article title.
pub const TITLE: &str = "titulo";
/// Wire name of the article body text.
pub const CONTENT: &str = "contenido";
/// Wire name of the creation date (`YYYY-MM-DD`).
pub const CREATION_DATE: &str = "fechaAlta";
/// Wire name of the owning user's identifier.
pub const OWNER_ID: &str = "usuarioId";

/// Required fields, in the order missing ones are reported.
const REQUIRED: [&str; 4] = [TITLE, CREATION_DATE, CONTENT, OWNER_ID];

/// Keys a partial update may carry.
const UPDATABLE: [&str; 4] = [TITLE, CONTENT, CREATION_DATE, OWNER_ID];

/// Why a payload was rejected. `Display` is the message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("No se han enviado los campos: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Se han enviado campos no permitidos: {}", .0.join(", "))]
    DisallowedFields(Vec<String>),

    #[error("El identificador del usuarioId no es un UUID.")]
    InvalidOwnerId,

    #[error("El campo fecha de alta no tiene el formato correcto (yyyy-MM-dd).")]
    InvalidDateShape,
}

/// Fields of a validated creation payload, taken verbatim from the request.
///
/// Title and content are not shape-checked and keep whatever JSON value the
/// client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: Value,
    pub content: Value,
    pub creation_date: String,
    pub owner_id: String,
}

/// Validate a creation payload.
///
/// Checks run in order: missing fields, owner identifier shape, date shape.
/// The first failing check is returned.
pub fn validate_creation(payload: &Map<String, Value>) -> Result<NewArticle, FieldError> {
    let missing: Vec<&'static str> = REQUIRED
        .into_iter()
        .filter(|field| !payload.get(*field).is_some_and(is_present))
        .collect();
    if !missing.is_empty() {
        return Err(FieldError::MissingFields(missing));
    }

    let owner_id = payload
        .get(OWNER_ID)
        .and_then(Value::as_str)
        .filter(|s| is_valid_identifier(s))
        .ok_or(FieldError::InvalidOwnerId)?;

    let creation_date = payload
        .get(CREATION_DATE)
        .and_then(Value::as_str)
        .filter(|s| is_valid_date_shape(s))
        .ok_or(FieldError::InvalidDateShape)?;

    Ok(NewArticle {
        title: payload.get(TITLE).cloned().unwrap_or_default(),
        content: payload.get(CONTENT).cloned().unwrap_or_default(),
        creation_date: creation_date.to_owned(),
        owner_id: owner_id.to_owned(),
    })
}

/// Validate a partial update payload. An empty payload is valid.
///
/// Checks run in order: unknown keys, owner identifier shape, date shape.
/// Null, false, zero and empty-string values skip the shape checks and are
/// forwarded as sent.
pub fn validate_partial_update(payload: &Map<String, Value>) -> Result<(), FieldError> {
    let disallowed: Vec<String> = payload
        .keys()
        .filter(|key| !UPDATABLE.contains(&key.as_str()))
        .cloned()
        .collect();
    if !disallowed.is_empty() {
        return Err(FieldError::DisallowedFields(disallowed));
    }

    if let Some(owner_id) = payload.get(OWNER_ID).filter(|v| is_present(v)) {
        if !owner_id.as_str().is_some_and(is_valid_identifier) {
            return Err(FieldError::InvalidOwnerId);
        }
    }

    if let Some(date) = payload.get(CREATION_DATE).filter(|v| is_present(v)) {
        if !date.as_str().is_some_and(is_valid_date_shape) {
            return Err(FieldError::InvalidDateShape);
        }
    }

    Ok(())
}

/// A field counts as sent unless it is null, false, zero or an empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
