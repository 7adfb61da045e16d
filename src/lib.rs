//! Articles gateway library.
//!
//! Validates article requests and checks that referenced articles and users
//! exist before forwarding reads and writes to an upstream record store.

pub mod articles;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod validation;

pub use articles::{Article, ArticleService, GatewayError};
pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use upstream::{HttpRecordStore, RecordStore};
