//! Shared test fixtures for bridge tests.

use crate::monitor::{ApiError, ChangeEvent, ChangeNotifier, NotificationFacility, Subscription};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FacilityState {
    /// Every notifier ever handed over, released or not.
    notifiers: Vec<ChangeNotifier>,
    /// Registrations currently held by the facility.
    active: Vec<ChangeEvent>,
    register_attempts: Vec<ChangeEvent>,
    unregister_calls: Vec<ChangeEvent>,
}

/// Simulated OS notification facility.
///
/// Callbacks are fired explicitly by tests, optionally from a plain OS thread
/// to mimic the platform's callback threads.
#[derive(Debug, Clone, Default)]
pub struct MockFacility {
    state: Arc<Mutex<FacilityState>>,
    fail_register: Option<ChangeEvent>,
    fail_unregister: Vec<ChangeEvent>,
}

impl MockFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facility whose registration of `event` fails.
    pub fn failing_register(event: ChangeEvent) -> Self {
        Self {
            fail_register: Some(event),
            ..Self::default()
        }
    }

    /// Facility whose subscriptions for `events` fail to unregister.
    pub fn failing_unregister(events: &[ChangeEvent]) -> Self {
        Self {
            fail_unregister: events.to_vec(),
            ..Self::default()
        }
    }

    /// Invokes every callback ever registered for `event` on the current thread.
    ///
    /// Released registrations are included so tests can model a callback
    /// racing with unregistration.
    pub fn fire(&self, event: ChangeEvent) {
        let notifiers: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .notifiers
            .iter()
            .filter(|n| n.event() == event)
            .cloned()
            .collect();

        for notifier in notifiers {
            notifier.notify();
        }
    }

    /// Invokes the callback from a freshly spawned OS thread and waits for it.
    pub fn fire_from_os_thread(&self, event: ChangeEvent) {
        let facility = self.clone();
        std::thread::spawn(move || facility.fire(event))
            .join()
            .unwrap();
    }

    pub fn active(&self) -> Vec<ChangeEvent> {
        self.state.lock().unwrap().active.clone()
    }

    pub fn register_attempts(&self) -> Vec<ChangeEvent> {
        self.state.lock().unwrap().register_attempts.clone()
    }

    pub fn unregister_calls(&self) -> Vec<ChangeEvent> {
        self.state.lock().unwrap().unregister_calls.clone()
    }
}

impl NotificationFacility for MockFacility {
    type Subscription = MockSubscription;

    fn register(&self, notifier: ChangeNotifier) -> Result<MockSubscription, ApiError> {
        let event = notifier.event();
        let mut state = self.state.lock().unwrap();
        state.register_attempts.push(event);

        if self.fail_register == Some(event) {
            return Err(ApiError::platform(format!("{event} registration refused")));
        }

        state.notifiers.push(notifier);
        state.active.push(event);

        Ok(MockSubscription {
            event,
            state: Arc::clone(&self.state),
            fail: self.fail_unregister.contains(&event),
        })
    }
}

/// Subscription handed out by [`MockFacility`].
#[derive(Debug)]
pub struct MockSubscription {
    event: ChangeEvent,
    state: Arc<Mutex<FacilityState>>,
    fail: bool,
}

impl Subscription for MockSubscription {
    fn unregister(self) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.unregister_calls.push(self.event);

        if self.fail {
            return Err(ApiError::platform(format!("{} unregister refused", self.event)));
        }

        state.active.retain(|e| *e != self.event);
        Ok(())
    }
}
