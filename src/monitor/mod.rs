//! Monitor layer for network configuration change notifications.
//!
//! This module provides types and functions for:
//! - Representing change events ([`ChangeEvent`])
//! - Error handling ([`MonitorError`], [`ApiError`])
//! - The OS facility boundary ([`NotificationFacility`], [`Subscription`])
//! - Callback hand-off ([`ChangeNotifier`])
//! - Pull-based consumption ([`Bridge`])
//! - Platform implementations ([`platform`])

mod bridge;
mod error;
mod event;
mod facility;
mod heartbeat;
mod notifier;
pub mod platform;

#[cfg(test)]
mod test_fixtures;

pub use bridge::Bridge;
pub use error::{ApiError, MonitorError};
pub use event::ChangeEvent;
pub use facility::{NotificationFacility, Subscription};
pub use heartbeat::DEFAULT_HEARTBEAT_INTERVAL;
pub use notifier::ChangeNotifier;
