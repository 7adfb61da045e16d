//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID span, JSON payload extraction)
//!     → handlers.rs (unpack path + payload)
//!     → [articles service decides the outcome]
//!     → response.rs (error → status code + body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{Payload, X_REQUEST_ID};
pub use server::{GatewayServer, GatewayState};
