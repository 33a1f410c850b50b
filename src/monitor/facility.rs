//! OS notification facility abstraction.
//!
//! This module provides the [`NotificationFacility`] and [`Subscription`] traits
//! that abstract platform APIs delivering network change callbacks.

use super::{ApiError, ChangeNotifier};

/// Trait for platform APIs that call back when network configuration changes.
///
/// Implementations wrap APIs like Windows `NotifyUnicastIpAddressChange` and
/// `NotifyRouteChange2`. The facility is a black box: it only ever signals
/// that a change of the notifier's [`ChangeNotifier::event`] kind happened.
///
/// # Callback Contract
///
/// The facility invokes [`ChangeNotifier::notify`] from whatever thread it
/// owns. `notify` never blocks, so OS callback threads return immediately.
///
/// # Example
///
/// ```ignore
/// use netchange::monitor::{Bridge, NotificationFacility};
///
/// async fn first_change<F: NotificationFacility>(facility: &F) {
///     let bridge = Bridge::open(facility).expect("register notifications");
///     let event = bridge.receive().await;
///     println!("{event:?}");
///     bridge.close().expect("unregister notifications");
/// }
/// ```
pub trait NotificationFacility {
    /// Handle for one active registration.
    type Subscription: Subscription;

    /// Registers a callback for the notifier's event kind.
    ///
    /// # Errors
    ///
    /// Returns the platform error if the registration could not be established.
    /// Nothing stays registered in that case.
    fn register(&self, notifier: ChangeNotifier) -> Result<Self::Subscription, ApiError>;
}

/// An active registration with the notification facility.
///
/// Releasing is the terminal operation: `unregister` consumes the handle, so
/// a released subscription can never be referenced again.
pub trait Subscription: Send {
    /// Releases the registration.
    ///
    /// # Errors
    ///
    /// Returns the platform error if the OS refused to cancel the registration.
    fn unregister(self) -> Result<(), ApiError>;
}
