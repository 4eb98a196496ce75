use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Broadcast to every long running task to request a graceful stop.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub struct Shutdown;

/// Construct the [`Shutdown`] broadcast channel. Every task subscribes its own receiver.
pub fn shutdown_channel() -> broadcast::Sender<Shutdown> {
    let (tx, _) = broadcast::channel(1);
    tx
}

/// Wait for Ctrl-C (SIGINT), or SIGTERM on unix.
pub async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
