//! Fixed-cadence scheduler with an explicit start/stop lifecycle.

use std::{future::Future, time::Duration};

use tokio::{
    task::{JoinHandle, JoinSet},
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    period: Duration,
}

impl Poller {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the loop. The first tick fires one period after start, and each
    /// tick after that fires on schedule whether or not earlier ticks finished.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(&self, tick: F) -> PollerHandle
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Owned by the loop so cancelling the loop also cancels in-flight ticks.
            let mut inflight = JoinSet::new();
            loop {
                ticker.tick().await;
                while inflight.try_join_next().is_some() {}
                debug!(inflight = inflight.len(), "poll: tick");
                inflight.spawn(tick());
            }
        });

        PollerHandle { task: Some(task) }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

/// Running poll loop. Dropping the handle stops the loop.
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the loop and every tick still in flight, and waits for the
    /// loop to wind down.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            debug!("poll: stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod tests;
