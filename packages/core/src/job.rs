//! Job record types tracked by the queue worker.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use ulid::Ulid;

use crate::ServiceId;

/// Priority value that marks a job for discard instead of queueing.
pub const DROP_PRIORITY: i32 = -1;

/// Unique identifier for a job, using ULID for chronological sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Ulid);

impl JobId {
    /// Create a new unique job ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a job ID from a string.
    pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job.
///
/// Ordered: a job only ever moves forward through
/// `Waiting -> Running -> Finished`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Registered and waiting for an execution slot.
    #[default]
    Waiting,
    /// Holding an execution slot.
    Running,
    /// Done. Terminal.
    Finished,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished)
    }

    /// Whether moving from `self` to `next` keeps the lifecycle monotonic.
    ///
    /// Re-asserting the current status is allowed.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        next >= *self
    }

    /// Get a simple status string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Waiting => "WAITING",
            JobStatus::Running => "RUNNING",
            JobStatus::Finished => "FINISHED",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-use notification that an execution slot opened for a job.
///
/// The job holder keeps a clone and awaits [`SlotSignal::wait`]; the queue
/// worker fires it once when the job enters [`JobStatus::Running`]. A fire
/// that happens before anyone waits is remembered.
#[derive(Debug, Clone, Default)]
pub struct SlotSignal(Arc<Notify>);

impl SlotSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the waiting job holder.
    pub fn notify(&self) {
        self.0.notify_one();
    }

    /// Wait until the slot opens.
    pub async fn wait(&self) {
        self.0.notified().await;
    }
}

/// A unit of work registered with the queue worker.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Unique identifier for this job.
    pub id: JobId,
    /// The service this job runs.
    pub service: ServiceId,
    /// Priority; [`DROP_PRIORITY`] marks the job for discard.
    pub priority: i32,
    /// Services to queue once this job finishes, in order.
    pub follow_up: Vec<ServiceId>,
    /// Fired when an execution slot opens for this job.
    pub slot: Option<SlotSignal>,
    /// Current status.
    pub status: JobStatus,
    /// Set when the record was synthesized from another job's follow-up list.
    pub from_follow_up: bool,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new waiting job for a service.
    pub fn new(service: impl Into<ServiceId>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            service: service.into(),
            priority: 0,
            follow_up: Vec::new(),
            slot: None,
            status: JobStatus::Waiting,
            from_follow_up: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the record queued for `service` after `parent` finishes.
    pub fn follow_up_of(parent: &JobRecord, service: ServiceId) -> Self {
        let mut job = Self::new(service).with_priority(parent.priority);
        job.from_follow_up = true;
        job
    }

    /// Set the priority for this job.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the services to run after this job.
    pub fn with_follow_up(mut self, follow_up: Vec<ServiceId>) -> Self {
        self.follow_up = follow_up;
        self
    }

    /// Attach the slot signal the job holder waits on.
    pub fn with_slot(mut self, slot: SlotSignal) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Set the status carried by this record.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the priority asks for the job to be dropped.
    pub fn is_marked_for_drop(&self) -> bool {
        self.priority == DROP_PRIORITY
    }

    /// The `(service, status)` pair reported by status queries.
    pub fn status_entry(&self) -> StatusEntry {
        StatusEntry {
            service: self.service.clone(),
            status: self.status,
        }
    }
}

/// One row of a per-service status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub service: ServiceId,
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        assert!(JobStatus::Waiting.can_transition_to(JobStatus::Running));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Finished));
        assert!(JobStatus::Waiting.can_transition_to(JobStatus::Finished));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Running));

        assert!(!JobStatus::Finished.can_transition_to(JobStatus::Running));
        assert!(!JobStatus::Running.can_transition_to(JobStatus::Waiting));
        assert!(JobStatus::Finished.is_terminal());
    }

    #[test]
    fn new_job_defaults() {
        let job = JobRecord::new("svc-1");
        assert_eq!(job.status, JobStatus::Waiting);
        assert_eq!(job.priority, 0);
        assert!(job.slot.is_none());
        assert!(!job.from_follow_up);
        assert!(!job.is_marked_for_drop());
        assert!(job.with_priority(DROP_PRIORITY).is_marked_for_drop());
    }

    #[test]
    fn follow_up_inherits_priority() {
        let parent = JobRecord::new("build").with_priority(7);
        let child = JobRecord::follow_up_of(&parent, ServiceId::new("deploy"));

        assert_ne!(child.id, parent.id);
        assert_eq!(child.service.as_str(), "deploy");
        assert_eq!(child.priority, 7);
        assert_eq!(child.status, JobStatus::Waiting);
        assert!(child.from_follow_up);
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&JobStatus::Running).unwrap();
        assert_eq!(json, "\"RUNNING\"");

        let entry = JobRecord::new("svc-1").status_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["service"], "svc-1");
        assert_eq!(json["status"], "WAITING");
    }

    #[tokio::test]
    async fn slot_signal_remembers_early_fire() {
        let slot = SlotSignal::new();
        let holder = slot.clone();
        slot.notify();
        holder.wait().await;
    }
}
