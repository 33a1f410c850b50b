//! Hand-off from OS callback threads into the bridge queue.

use super::ChangeEvent;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Trigger handed to the OS notification facility for one event kind.
///
/// The facility calls [`ChangeNotifier::notify`] from its own callback thread.
/// That thread is never held: the enqueue work runs on a short-lived tokio
/// task that offers the event to the bridge's single-slot queue and gives up
/// silently once the bridge is closed.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    event: ChangeEvent,
    sender: mpsc::Sender<ChangeEvent>,
    cancel: CancellationToken,
    runtime: Handle,
}

impl ChangeNotifier {
    pub(super) const fn new(
        event: ChangeEvent,
        sender: mpsc::Sender<ChangeEvent>,
        cancel: CancellationToken,
        runtime: Handle,
    ) -> Self {
        Self {
            event,
            sender,
            cancel,
            runtime,
        }
    }

    /// The event kind this notifier produces.
    #[must_use]
    pub const fn event(&self) -> ChangeEvent {
        self.event
    }

    /// Signals that a change occurred.
    ///
    /// Safe to call from any thread, including threads unknown to tokio.
    /// Returns without waiting for the event to be queued.
    pub fn notify(&self) {
        if self.cancel.is_cancelled() {
            tracing::trace!("Ignoring {} change, monitor closed", self.event);
            return;
        }

        let event = self.event;
        let sender = self.sender.clone();
        let cancel = self.cancel.clone();
        drop(self.runtime.spawn(hand_off(event, sender, cancel)));
    }
}

/// Offers one event to the queue, racing against cancellation.
///
/// Waits while the slot is full, so a slow consumer delays the event
/// rather than losing it.
async fn hand_off(
    event: ChangeEvent,
    sender: mpsc::Sender<ChangeEvent>,
    cancel: CancellationToken,
) {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::trace!("Dropping {event} change, monitor closed");
        }
        result = sender.send(event) => {
            if result.is_err() {
                tracing::trace!("Dropping {event} change, receiver gone");
            }
        }
    }
}
