//! Request validation subsystem.
//!
//! # Data Flow
//! ```text
//! path parameter ──→ identifier.rs (UUID v4 shape)
//! JSON payload   ──→ fields.rs (field set + per-field shape)
//!                        ├─→ identifier.rs (usuarioId)
//!                        └─→ date.rs (fechaAlta)
//! ```
//!
//! # Design Decisions
//! - Shape checks only; no calendar or existence checks here
//! - Every check is a pure function returning a value, never panics
//! - One error per call, except missing fields on creation which are reported together

pub mod date;
pub mod fields;
pub mod identifier;

pub use date::is_valid_date_shape;
pub use fields::{validate_creation, validate_partial_update, FieldError, NewArticle};
pub use identifier::is_valid_identifier;
