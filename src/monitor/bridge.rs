//! Push-to-pull bridge over OS change notifications.
//!
//! This module provides [`Bridge`], which registers address and route change
//! callbacks with a [`NotificationFacility`] and lets a consumer pull the
//! resulting [`ChangeEvent`]s one at a time.

use super::heartbeat::{DEFAULT_HEARTBEAT_INTERVAL, Heartbeat};
use super::{ChangeEvent, ChangeNotifier, MonitorError, NotificationFacility, Subscription};
use std::sync::{Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Number of unread events the bridge holds before hand-off tasks wait.
const QUEUE_CAPACITY: usize = 1;

/// Pull-based view of network change notifications.
///
/// Opening a bridge registers one callback for unicast address changes and
/// one for routing table changes. Each callback only spawns a hand-off task,
/// so OS threads are released immediately; the task places the event in a
/// single-slot queue drained by [`Bridge::receive`].
///
/// # Lifecycle
///
/// The bridge is Open after construction and becomes Closed exactly once,
/// on the first [`Bridge::close`]. After that, `receive` fails with
/// [`MonitorError::Closed`] and no queued event is ever handed out.
/// The caller owns the close call.
///
/// # Example
///
/// ```ignore
/// use netchange::monitor::Bridge;
/// use netchange::monitor::platform::PlatformFacility;
///
/// # async fn example() -> Result<(), netchange::monitor::MonitorError> {
/// let bridge = Bridge::open(&PlatformFacility)?;
///
/// loop {
///     match bridge.receive().await {
///         Ok(event) => println!("network changed: {event}"),
///         Err(e) if e.is_closed() => break,
///         Err(e) => return Err(e),
///     }
/// }
///
/// bridge.close()
/// # }
/// ```
pub struct Bridge<S> {
    cancel: CancellationToken,
    receiver: Mutex<mpsc::Receiver<ChangeEvent>>,
    address: StdMutex<Option<S>>,
    route: StdMutex<Option<S>>,
    heartbeat: Heartbeat,
    runtime: Handle,
}

impl<S> std::fmt::Debug for Bridge<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("closed", &self.cancel.is_cancelled())
            .field("has_address", &is_held(&self.address))
            .field("has_route", &is_held(&self.route))
            .finish_non_exhaustive()
    }
}

impl<S: Subscription> Bridge<S> {
    /// Registers both change notifications on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::NoRuntime`] when called outside a tokio runtime.
    /// - [`MonitorError::Register`] when either registration fails. No
    ///   registration is left behind.
    pub fn open<F>(facility: &F) -> Result<Self, MonitorError>
    where
        F: NotificationFacility<Subscription = S>,
    {
        let runtime = Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;
        Self::open_with(facility, runtime, DEFAULT_HEARTBEAT_INTERVAL)
    }

    /// Registers both change notifications with an explicit runtime and
    /// heartbeat period.
    ///
    /// Hand-off tasks and the heartbeat are spawned on `runtime`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Register`] when either registration fails.
    /// If the route registration fails, the address registration is
    /// released before returning.
    pub fn open_with<F>(
        facility: &F,
        runtime: Handle,
        heartbeat_interval: Duration,
    ) -> Result<Self, MonitorError>
    where
        F: NotificationFacility<Subscription = S>,
    {
        let cancel = CancellationToken::new();
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let notifier = |event| {
            ChangeNotifier::new(event, sender.clone(), cancel.clone(), runtime.clone())
        };

        let address = facility
            .register(notifier(ChangeEvent::AddressChanged))
            .map_err(|source| {
                tracing::error!("Address change registration error: {source}");
                MonitorError::Register {
                    event: ChangeEvent::AddressChanged,
                    source,
                }
            })?;

        let route = match facility.register(notifier(ChangeEvent::RouteChanged)) {
            Ok(route) => route,
            Err(source) => {
                tracing::error!("Route change registration error: {source}");
                if let Err(e) = address.unregister() {
                    tracing::error!("Address change unregister error during rollback: {e}");
                }
                return Err(MonitorError::Register {
                    event: ChangeEvent::RouteChanged,
                    source,
                });
            }
        };

        let heartbeat = Heartbeat::spawn(&runtime, heartbeat_interval);
        tracing::debug!("Network change notifications registered");

        Ok(Self {
            cancel,
            receiver: Mutex::new(receiver),
            address: StdMutex::new(Some(address)),
            route: StdMutex::new(Some(route)),
            heartbeat,
            runtime,
        })
    }

    /// Closes the bridge.
    ///
    /// Cancellation comes first, so blocked [`Bridge::receive`] calls return
    /// [`MonitorError::Closed`] and pending hand-offs are abandoned. Then the
    /// heartbeat is stopped and both subscriptions are released. A release
    /// failure is logged and teardown continues.
    ///
    /// Each subscription is taken out of the bridge before it is released,
    /// so later calls skip it and return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the last [`MonitorError::Unregister`] failure, if any.
    pub fn close(&self) -> Result<(), MonitorError> {
        self.cancel.cancel();
        self.heartbeat.stop();

        let mut result = Ok(());
        for (event, slot) in [
            (ChangeEvent::AddressChanged, &self.address),
            (ChangeEvent::RouteChanged, &self.route),
        ] {
            let Some(subscription) = take(slot) else {
                continue;
            };

            if let Err(source) = subscription.unregister() {
                tracing::error!("{event} change unregister error: {source}");
                result = Err(MonitorError::Unregister { event, source });
            }
        }

        result
    }
}

impl<S> Bridge<S> {
    /// Waits for the next change event.
    ///
    /// Only one outstanding call is the supported usage; concurrent callers
    /// each get at most one event, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Closed`] immediately if the bridge is already
    /// closed, or as soon as [`Bridge::close`] is called while waiting.
    pub async fn receive(&self) -> Result<ChangeEvent, MonitorError> {
        if self.cancel.is_cancelled() {
            tracing::warn!("Receive call on closed monitor");
            return Err(MonitorError::Closed);
        }

        let started = Instant::now();

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(MonitorError::Closed),
            event = self.next_queued() => {
                let event = event.ok_or(MonitorError::Closed)?;
                tracing::debug!(
                    "Got network change event after {:?}: evt={event}",
                    round_to_millis(started.elapsed())
                );
                Ok(event)
            }
        }
    }

    /// Blocks the calling thread until the next change event.
    ///
    /// Intended for plain OS threads that are not driving the runtime. The
    /// bridge must have been opened on a multi-thread runtime: its workers
    /// run the hand-off tasks while this thread waits.
    ///
    /// # Errors
    ///
    /// - [`MonitorError::CurrentThreadRuntime`] when the bridge was opened on
    ///   a current-thread runtime.
    /// - Otherwise the same as [`Bridge::receive`].
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context.
    pub fn blocking_receive(&self) -> Result<ChangeEvent, MonitorError> {
        if self.runtime.runtime_flavor() == RuntimeFlavor::CurrentThread {
            tracing::error!("Blocking receive on a current-thread runtime would never wake");
            return Err(MonitorError::CurrentThreadRuntime);
        }

        self.runtime.block_on(self.receive())
    }

    /// Returns true once [`Bridge::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    async fn next_queued(&self) -> Option<ChangeEvent> {
        self.receiver.lock().await.recv().await
    }
}

fn take<S>(slot: &StdMutex<Option<S>>) -> Option<S> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

fn is_held<S>(slot: &StdMutex<Option<S>>) -> bool {
    slot.lock().unwrap_or_else(PoisonError::into_inner).is_some()
}

fn round_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::test_fixtures::MockFacility;
    use tokio::time::timeout;

    #[tokio::test]
    async fn close_stops_heartbeat() {
        let facility = MockFacility::new();
        let bridge = Bridge::open(&facility).unwrap();
        tokio::task::yield_now().await;
        assert!(!bridge.heartbeat.is_finished());

        bridge.close().unwrap();

        timeout(Duration::from_secs(5), async {
            while !bridge.heartbeat.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("heartbeat still running after close");
    }
}
