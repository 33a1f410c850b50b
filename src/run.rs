//! Application execution logic.
//!
//! This module contains the main async loop that waits for network
//! change events and logs them until shutdown.

use std::future::Future;

use thiserror::Error;

use netchange::config::ValidatedConfig;
use netchange::monitor::{Bridge, MonitorError, Subscription};

#[cfg(windows)]
use netchange::monitor::platform::PlatformFacility;
#[cfg(windows)]
use tokio::signal;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to register change notifications.
    #[error("Failed to start change monitor: {0}")]
    Open(#[source] MonitorError),

    /// Failed to release change notifications.
    #[error("Failed to close change monitor: {0}")]
    Close(#[source] MonitorError),

    /// No notification facility exists for the current platform.
    #[cfg(not(windows))]
    #[error("No network change notification facility on this platform")]
    Unsupported,
}

/// Executes the main application loop.
///
/// This function:
/// 1. Registers address and route change notifications
/// 2. Logs every change event until Ctrl+C or `max_events`
/// 3. Releases the notifications
///
/// # Errors
///
/// Returns an error if registration or release fails, or if the platform
/// has no notification facility.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
#[cfg(windows)]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let bridge = Bridge::open_with(
        &PlatformFacility,
        tokio::runtime::Handle::current(),
        config.heartbeat_interval,
    )
    .map_err(RunError::Open)?;

    tracing::info!("Monitoring address and route changes (Ctrl+C to stop)");
    let count = monitor(&bridge, config.max_events, shutdown_signal()).await?;
    tracing::info!("Monitor closed after {count} change(s)");

    Ok(())
}

/// Executes the main application loop.
///
/// # Errors
///
/// Always returns [`RunError::Unsupported`].
#[cfg(not(windows))]
#[allow(clippy::unused_async)]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    tracing::debug!("{config}");
    Err(RunError::Unsupported)
}

/// Logs change events until shutdown, then closes the bridge.
///
/// Returns the number of events received.
#[cfg_attr(not(any(windows, test)), allow(dead_code))]
async fn monitor<S, F>(
    bridge: &Bridge<S>,
    max_events: Option<u64>,
    shutdown: F,
) -> Result<u64, RunError>
where
    S: Subscription,
    F: Future<Output = ()>,
{
    let count = receive_loop(bridge, max_events, shutdown).await;
    bridge.close().map_err(RunError::Close)?;
    Ok(count)
}

#[cfg_attr(not(any(windows, test)), allow(dead_code))]
async fn receive_loop<S, F>(bridge: &Bridge<S>, max_events: Option<u64>, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut count = 0;

    while max_events.is_none_or(|max| count < max) {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                break;
            }

            result = bridge.receive() => {
                match result {
                    Ok(event) => {
                        count += 1;
                        tracing::info!("Network change #{count}: {event}");
                    }
                    Err(e) => {
                        tracing::warn!("Monitor stopped: {e}");
                        break;
                    }
                }
            }
        }
    }

    count
}

/// Waits for Ctrl+C.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
#[cfg(windows)]
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}
