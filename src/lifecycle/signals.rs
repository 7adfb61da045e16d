//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A handler that cannot be installed never fires, leaving other shutdown paths intact

/// Resolve when the process receives Ctrl+C (SIGINT).
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
