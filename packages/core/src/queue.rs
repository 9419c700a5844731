//! Queue statistics reported by the queue worker.

use serde::{Deserialize, Serialize};

use crate::JobStatus;

/// Number of recent heartbeat markers kept for diagnostics.
pub const RECENT_TICKS: usize = 16;

/// Heartbeat diagnostics observed by the queue worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatStats {
    /// Ticks processed since start.
    pub observed: u64,
    /// Marker of the most recent tick.
    pub last_marker: Option<u64>,
    /// Most recent markers, oldest first.
    pub recent: Vec<u64>,
}

/// Snapshot of the queue worker's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueStats {
    /// Number of waiting jobs.
    pub waiting: u64,
    /// Number of running jobs.
    pub running: u64,
    /// Number of finished jobs still held in the queue.
    pub finished: u64,
    /// Jobs discarded at enqueue time by the drop policy.
    pub dropped: u64,
    /// Heartbeat diagnostics.
    pub heartbeat: HeartbeatStats,
}

impl QueueStats {
    /// Total records held in the queue.
    pub fn queued(&self) -> u64 {
        self.waiting + self.running + self.finished
    }

    /// Count one record with the given status.
    pub fn count(&mut self, status: JobStatus) {
        match status {
            JobStatus::Waiting => self.waiting += 1,
            JobStatus::Running => self.running += 1,
            JobStatus::Finished => self.finished += 1,
        }
    }
}
