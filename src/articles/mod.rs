//! Articles subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler (path id, JSON payload)
//!     → service.rs (validate → check existence → validate payload → store call)
//!     → GatewayResult<T>
//!     → http/response.rs (status code + body)
//! ```

pub mod error;
pub mod service;
pub mod types;

pub use error::{GatewayError, GatewayResult, PathResource};
pub use service::ArticleService;
pub use types::Article;
