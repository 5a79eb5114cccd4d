//! Ctrl-C handling

use std::future::Future;
use tracing::warn;

/// Resolves once the user interrupts the run
pub async fn interrupted() {
    wait_for_interrupt(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` reports an interrupt.
///
/// A listener that fails to register never resolves, so the run is left to
/// finish instead of being reported as interrupted.
pub async fn wait_for_interrupt<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
