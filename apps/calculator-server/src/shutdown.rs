use std::future::Future;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Cancel `cancel` on the first termination signal.
pub fn cancel_on_signal(cancel: CancellationToken) {
    tokio::spawn(cancel_after(cancel, wait_for_shutdown(), signal::ctrl_c()));
}

/// Cancel once `waiter` resolves. When `waiter` fails, `fallback` is awaited
/// instead; when that fails as well no signal can be observed any more and
/// the token is cancelled right away.
async fn cancel_after<W, F>(cancel: CancellationToken, waiter: W, fallback: F)
where
    W: Future<Output = Result<()>>,
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = waiter.await {
        tracing::warn!(error = %e, "signal waiter failed, falling back to ctrl_c()");
        if let Err(e) = fallback.await {
            tracing::error!(error = %e, "ctrl_c() fallback failed, shutting down");
        }
    }
    cancel.cancel();
}

/// Wait for Ctrl+C or SIGTERM.
async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        }
        result = wait_sigterm() => result?,
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<()> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    sigterm.recv().await;
    tracing::info!("Received SIGTERM signal");
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<()> {
    std::future::pending().await
}
