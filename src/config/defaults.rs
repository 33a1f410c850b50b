//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::monitor::DEFAULT_HEARTBEAT_INTERVAL;

/// Default heartbeat period in seconds (5000 hours).
pub const HEARTBEAT_INTERVAL_SECS: u64 = DEFAULT_HEARTBEAT_INTERVAL.as_secs();

/// Largest accepted heartbeat period in seconds (100 000 hours).
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 100_000 * 60 * 60;

/// Default heartbeat period as Duration.
#[must_use]
pub const fn heartbeat_interval() -> Duration {
    Duration::from_secs(HEARTBEAT_INTERVAL_SECS)
}
