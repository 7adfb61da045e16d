//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Initialize logging/metrics → Build store client → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

pub mod shutdown;
pub mod signals;

pub use shutdown::{wait_for_shutdown, Shutdown};
