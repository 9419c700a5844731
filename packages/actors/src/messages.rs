//! Message types for the queue worker.

use ractor::RpcReplyPort;
use registry_core::{JobId, JobRecord, JobStatus, QueueStats, RegistryError, ServiceId, StatusEntry};

/// Messages accepted by the [`QueueActor`](crate::QueueActor).
///
/// The mailbox is the only way in: every producer sends one of these and the
/// actor handles them one at a time in arrival order.
#[derive(Debug)]
pub enum QueueMessage {
    /// Append a job to the queue.
    Enqueue { job: Box<JobRecord> },

    /// Report the status of one job.
    GetStatus {
        job: Box<JobRecord>,
        reply: RpcReplyPort<JobStatus>,
    },

    /// Report every queued job for a service, in queue order.
    GetAllStatus {
        service: ServiceId,
        reply: RpcReplyPort<Vec<StatusEntry>>,
    },

    /// Move a queued job forward in its lifecycle.
    SetStatus {
        job_id: JobId,
        status: JobStatus,
        reply: RpcReplyPort<Result<JobStatus, RegistryError>>,
    },

    /// Get queue stats.
    GetStats { reply: RpcReplyPort<QueueStats> },

    /// Heartbeat from the emitter.
    Tick { marker: u64 },

    /// Stop after everything already in the mailbox.
    Shutdown,
}
