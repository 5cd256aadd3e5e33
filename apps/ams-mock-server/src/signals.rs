use anyhow::Result;
use tokio::signal;

/// Resolves on Ctrl+C or, on unix, SIGTERM.
///
/// # Errors
/// Fails when a signal handler can't be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("received Ctrl+C");
        }
        result = sigterm() => {
            result?;
            tracing::info!("received SIGTERM");
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn sigterm() -> Result<()> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    terminate.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<()> {
    std::future::pending().await
}
