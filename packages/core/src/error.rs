//! Errors reported by the job registry.

use crate::{JobId, JobStatus};

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Invalid status transition for job {job_id}: {from} -> {to}")]
    InvalidTransition {
        job_id: JobId,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("Queue worker unavailable: {0}")]
    ActorUnavailable(String),

    #[error("Queue worker dropped the reply")]
    ReplyDropped,

    #[error("Timeout")]
    Timeout,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
