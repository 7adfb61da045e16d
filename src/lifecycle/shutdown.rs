//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// The server subscribes once at startup; tests and the signal handler
/// trigger it.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Returns false if nobody was listening.
    pub fn trigger(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on Ctrl+C or when `shutdown` fires, whichever comes first.
///
/// A closed channel counts as a shutdown request.
pub async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = crate::lifecycle::signals::ctrl_c() => {
            tracing::info!("Interrupt received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown requested");
        }
    }
}
