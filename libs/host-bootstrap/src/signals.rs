use anyhow::Result;
use tokio::signal;

/// Wait for Ctrl+C or, on unix, SIGTERM.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C");
        }
        result = terminate() => {
            result?;
            tracing::info!("Received SIGTERM");
        }
    }
    Ok(())
}

/// Future for `axum::serve(..).with_graceful_shutdown(..)`.
///
/// A failure to install handlers is logged and treated as an immediate
/// shutdown request.
pub async fn shutdown_signal() {
    match wait_for_shutdown().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => tracing::error!(error = %e, "Signal handling failed, shutting down"),
    }
}

#[cfg(unix)]
async fn terminate() -> std::io::Result<()> {
    signal::unix::signal(signal::unix::SignalKind::terminate())?
        .recv()
        .await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> std::io::Result<()> {
    std::future::pending().await
}
