//! Keep-alive timer held for the lifetime of a bridge.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Default heartbeat period: 5000 hours.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5000 * 60 * 60);

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(1);

/// A scheduled no-op that keeps the runtime's timer wheel non-empty.
///
/// Change notifications arrive through callbacks registered with the OS,
/// which the runtime cannot see. Tooling that inspects the runtime for
/// pending work would otherwise conclude a waiting monitor has nothing left
/// to do. The task never does any work of its own.
#[derive(Debug)]
pub struct Heartbeat {
    task: JoinHandle<()>,
}

impl Heartbeat {
    /// Spawns the heartbeat on the given runtime.
    ///
    /// Periods below one millisecond are raised to one millisecond.
    #[must_use]
    pub fn spawn(runtime: &Handle, period: Duration) -> Self {
        let period = period.max(MIN_HEARTBEAT_INTERVAL);
        let task = runtime.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
            }
        });
        tracing::debug!("Heartbeat started (period: {period:?})");

        Self { task }
    }

    /// Stops the heartbeat. Calling it again has no effect.
    pub fn stop(&self) {
        if !self.task.is_finished() {
            self.task.abort();
            tracing::debug!("Heartbeat stopped");
        }
    }

    /// Returns true once the task has fully stopped.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    async fn wait_finished(heartbeat: &Heartbeat) {
        timeout(Duration::from_secs(5), async {
            while !heartbeat.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("heartbeat did not stop");
    }

    #[tokio::test]
    async fn runs_until_stopped() {
        let heartbeat = Heartbeat::spawn(&Handle::current(), DEFAULT_HEARTBEAT_INTERVAL);
        tokio::task::yield_now().await;
        assert!(!heartbeat.is_finished());

        heartbeat.stop();
        wait_finished(&heartbeat).await;
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let heartbeat = Heartbeat::spawn(&Handle::current(), Duration::from_secs(60));

        heartbeat.stop();
        heartbeat.stop();
        wait_finished(&heartbeat).await;
        heartbeat.stop();

        assert!(heartbeat.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_ticking_across_periods() {
        let heartbeat = Heartbeat::spawn(&Handle::current(), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(!heartbeat.is_finished());

        heartbeat.stop();
        wait_finished(&heartbeat).await;
    }

    #[tokio::test]
    async fn zero_period_is_clamped() {
        let heartbeat = Heartbeat::spawn(&Handle::current(), Duration::ZERO);
        tokio::task::yield_now().await;

        assert!(!heartbeat.is_finished());
        heartbeat.stop();
    }

    #[test]
    fn default_interval_is_five_thousand_hours() {
        assert_eq!(DEFAULT_HEARTBEAT_INTERVAL.as_secs(), 18_000_000);
    }
}
