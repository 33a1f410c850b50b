//! Error types for the monitor layer.

use super::ChangeEvent;
use thiserror::Error;

/// Error type for the OS notification facility.
///
/// Represents failures reported by the platform when registering or
/// cancelling a change notification.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Non-Windows or simulated facility failure.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message
        message: String,
    },
}

impl ApiError {
    /// Creates a `Platform` error from any message.
    #[must_use]
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }
}

/// Error type for bridge operations.
///
/// Callers performing a graceful shutdown should treat [`MonitorError::Closed`]
/// as the normal end of the event sequence; see [`MonitorError::is_closed`].
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A change notification could not be registered with the OS.
    ///
    /// Construction is aborted and nothing stays registered.
    #[error("Failed to register {event} change notification: {source}")]
    Register {
        /// The event kind whose registration failed
        event: ChangeEvent,
        /// Underlying facility error
        #[source]
        source: ApiError,
    },

    /// A change notification could not be released during close.
    ///
    /// Teardown of the remaining resources still happens.
    #[error("Failed to unregister {event} change notification: {source}")]
    Unregister {
        /// The event kind whose release failed
        event: ChangeEvent,
        /// Underlying facility error
        #[source]
        source: ApiError,
    },

    /// The bridge has been closed.
    #[error("closed")]
    Closed,

    /// The bridge was opened outside of a tokio runtime.
    #[error("No tokio runtime available to run change hand-off tasks")]
    NoRuntime,

    /// A blocking receive was attempted on a current-thread runtime.
    ///
    /// Hand-off tasks only run while that runtime's own `block_on` drives
    /// it, so a blocking wait on another thread would never see an event.
    #[error("Blocking receive requires a multi-thread tokio runtime")]
    CurrentThreadRuntime,
}

impl MonitorError {
    /// Returns true for the expected end-of-stream condition.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
