//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request span and the response headers
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
