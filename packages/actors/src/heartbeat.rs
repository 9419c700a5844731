//! Heartbeat emitter feeding ticks into the queue worker.

use std::time::Duration;

use ractor::ActorRef;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::messages::QueueMessage;

/// Monotonic tick marker that wraps to 0 after `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounter(u64);

impl TickCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Start counting at `marker`.
    pub fn starting_at(marker: u64) -> Self {
        Self(marker)
    }

    /// Return the current marker and advance by one.
    pub fn advance(&mut self) -> u64 {
        let marker = self.0;
        self.0 = self.0.wrapping_add(1);
        marker
    }
}

/// Sends a [`QueueMessage::Tick`] into the queue worker once per interval.
#[derive(Debug, Clone)]
pub struct HeartbeatEmitter {
    interval: Duration,
}

impl HeartbeatEmitter {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the emitter on its own task.
    ///
    /// The first tick goes out one interval after spawning. The task ends
    /// when the worker stops accepting messages or the handle is aborted.
    pub fn spawn(self, queue: ActorRef<QueueMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut counter = TickCounter::new();

            loop {
                interval.tick().await;
                let marker = counter.advance();
                if queue.send_message(QueueMessage::Tick { marker }).is_err() {
                    tracing::debug!(marker, "Queue worker gone, stopping heartbeat");
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        let mut counter = TickCounter::new();
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
    }

    #[test]
    fn counter_wraps() {
        let mut counter = TickCounter::starting_at(u64::MAX);
        assert_eq!(counter.advance(), u64::MAX);
        assert_eq!(counter.advance(), 0);
    }
}
