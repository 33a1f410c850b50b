//! Windows notification facility using the IP Helper change APIs.

use crate::monitor::{ApiError, ChangeEvent, ChangeNotifier, NotificationFacility, Subscription};
use std::ffi::c_void;
use std::mem::ManuallyDrop;
use windows::Win32::Foundation::{HANDLE, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    CancelMibChangeNotify2, MIB_IPFORWARD_ROW2, MIB_NOTIFICATION_TYPE, MIB_UNICASTIPADDRESS_ROW,
    NotifyRouteChange2, NotifyUnicastIpAddressChange,
};
use windows::Win32::Networking::WinSock::AF_UNSPEC;

/// Windows implementation of [`NotificationFacility`].
///
/// Address changes are registered with `NotifyUnicastIpAddressChange` and
/// route changes with `NotifyRouteChange2`, both for IPv4 and IPv6
/// (`AF_UNSPEC`) and without an initial notification.
///
/// # Example
///
/// ```no_run
/// use netchange::monitor::Bridge;
/// use netchange::monitor::platform::WindowsFacility;
///
/// # async fn example() -> Result<(), netchange::monitor::MonitorError> {
/// let bridge = Bridge::open(&WindowsFacility)?;
/// let event = bridge.receive().await?;
/// println!("network changed: {event}");
/// bridge.close()
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsFacility;

impl NotificationFacility for WindowsFacility {
    type Subscription = WindowsSubscription;

    fn register(&self, notifier: ChangeNotifier) -> Result<Self::Subscription, ApiError> {
        WindowsSubscription::register(notifier)
    }
}

/// Registration returned by `NotifyUnicastIpAddressChange` or
/// `NotifyRouteChange2`.
///
/// Dropping an unreleased subscription cancels it; [`Subscription::unregister`]
/// does the same and reports the outcome.
pub struct WindowsSubscription {
    event: ChangeEvent,
    handle: HANDLE,
    /// Leaked `CallbackContext`, reclaimed after a successful cancel.
    context: *mut CallbackContext,
}

impl std::fmt::Debug for WindowsSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsSubscription")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

// SAFETY: CancelMibChangeNotify2 can be called from any thread, and the
// context is only touched by the callback (shared, Sync) and by `release`.
unsafe impl Send for WindowsSubscription {}

/// Context passed to the Windows callback.
struct CallbackContext {
    notifier: ChangeNotifier,
}

impl WindowsSubscription {
    /// Registers the callback matching the notifier's event kind.
    ///
    /// # Coverage Note
    ///
    /// Excluded from coverage: requires real Windows API interaction.
    #[cfg(not(tarpaulin_include))]
    fn register(notifier: ChangeNotifier) -> Result<Self, ApiError> {
        let event = notifier.event();

        // Leaked until the registration is cancelled.
        let context = Box::into_raw(Box::new(CallbackContext { notifier }));
        let caller_context = context.cast::<c_void>().cast_const();

        let mut handle = HANDLE::default();

        // SAFETY: callbacks and context stay valid until CancelMibChangeNotify2
        // succeeds. InitialNotification = false means no callback on registration.
        let result = unsafe {
            match event {
                ChangeEvent::AddressChanged => NotifyUnicastIpAddressChange(
                    AF_UNSPEC,
                    Some(unicast_address_changed),
                    Some(caller_context),
                    false,
                    &raw mut handle,
                ),
                ChangeEvent::RouteChanged => NotifyRouteChange2(
                    AF_UNSPEC,
                    Some(route_changed),
                    caller_context,
                    false,
                    &raw mut handle,
                ),
            }
        };

        if result != NO_ERROR {
            // SAFETY: registration failed, so Windows never calls back.
            drop(unsafe { Box::from_raw(context) });
            return Err(windows::core::Error::from(WIN32_ERROR(result.0)).into());
        }

        Ok(Self {
            event,
            handle,
            context,
        })
    }

    /// Cancels the registration and frees the context on success.
    ///
    /// Must run at most once per subscription.
    fn release(&self) -> Result<(), ApiError> {
        // SAFETY: the handle came from a successful registration and has not
        // been cancelled yet.
        let result = unsafe { CancelMibChangeNotify2(self.handle) };
        if result != NO_ERROR {
            // Windows may still call back, so the context stays leaked.
            return Err(windows::core::Error::from(WIN32_ERROR(result.0)).into());
        }

        // SAFETY: after a successful cancel Windows no longer uses the context.
        drop(unsafe { Box::from_raw(self.context) });
        Ok(())
    }
}

impl Subscription for WindowsSubscription {
    fn unregister(self) -> Result<(), ApiError> {
        let this = ManuallyDrop::new(self);
        this.release()
    }
}

impl Drop for WindowsSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(
                "Dropped {} change notification could not be cancelled: {e}",
                self.event
            );
        }
    }
}

/// Callback for `NotifyUnicastIpAddressChange`.
///
/// # Coverage Note
///
/// Excluded from coverage: only called by Windows.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn unicast_address_changed(
    caller_context: *const c_void,
    _row: *const MIB_UNICASTIPADDRESS_ROW,
    _notification_type: MIB_NOTIFICATION_TYPE,
) {
    // SAFETY: caller_context was set in `WindowsSubscription::register`.
    unsafe { forward(caller_context) };
}

/// Callback for `NotifyRouteChange2`.
///
/// # Coverage Note
///
/// Excluded from coverage: only called by Windows.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn route_changed(
    caller_context: *const c_void,
    _row: *const MIB_IPFORWARD_ROW2,
    _notification_type: MIB_NOTIFICATION_TYPE,
) {
    // SAFETY: caller_context was set in `WindowsSubscription::register`.
    unsafe { forward(caller_context) };
}

/// Hands the change to the notifier and returns to Windows.
///
/// # Safety
///
/// `caller_context` must be null or point to a live `CallbackContext`.
unsafe fn forward(caller_context: *const c_void) {
    if caller_context.is_null() {
        return;
    }

    // SAFETY: guaranteed by the caller.
    let context = unsafe { &*caller_context.cast::<CallbackContext>() };
    context.notifier.notify();
}
