//! Client handle for talking to the queue worker.

use std::time::Duration;

use ractor::rpc::CallResult;
use ractor::{Actor, ActorRef, RpcReplyPort};
use registry_core::{
    JobId, JobRecord, JobStatus, QueueStats, RegistryConfig, RegistryError, ServiceId,
    StatusEntry,
};

use crate::messages::QueueMessage;
use crate::queue_actor::QueueActor;

/// Cloneable handle to a running queue worker.
///
/// Queries wait at most the configured reply timeout.
#[derive(Debug, Clone)]
pub struct QueueHandle {
    actor: ActorRef<QueueMessage>,
    reply_timeout: Duration,
}

impl QueueHandle {
    pub fn new(actor: ActorRef<QueueMessage>, reply_timeout: Duration) -> Self {
        Self {
            actor,
            reply_timeout,
        }
    }

    /// The underlying actor reference.
    pub fn actor(&self) -> &ActorRef<QueueMessage> {
        &self.actor
    }

    /// Register a job. Returns its id without waiting for the worker.
    pub fn enqueue(&self, job: JobRecord) -> Result<JobId, RegistryError> {
        let job_id = job.id;
        self.send(QueueMessage::Enqueue { job: Box::new(job) })?;
        Ok(job_id)
    }

    /// Ask for the status of one job.
    pub async fn status(&self, job: JobRecord) -> Result<JobStatus, RegistryError> {
        self.call(|reply| QueueMessage::GetStatus {
            job: Box::new(job),
            reply,
        })
        .await
    }

    /// Ask for the status of every queued job of a service.
    pub async fn all_status(
        &self,
        service: impl Into<ServiceId>,
    ) -> Result<Vec<StatusEntry>, RegistryError> {
        let service = service.into();
        self.call(|reply| QueueMessage::GetAllStatus { service, reply })
            .await
    }

    /// Move a queued job to `status`.
    pub async fn set_status(
        &self,
        job_id: JobId,
        status: JobStatus,
    ) -> Result<JobStatus, RegistryError> {
        self.call(|reply| QueueMessage::SetStatus {
            job_id,
            status,
            reply,
        })
        .await?
    }

    pub async fn stats(&self) -> Result<QueueStats, RegistryError> {
        self.call(|reply| QueueMessage::GetStats { reply }).await
    }

    /// Ask the worker to stop once its mailbox is drained up to this point.
    pub fn shutdown(&self) -> Result<(), RegistryError> {
        self.send(QueueMessage::Shutdown)
    }

    fn send(&self, message: QueueMessage) -> Result<(), RegistryError> {
        self.actor
            .send_message(message)
            .map_err(|e| RegistryError::ActorUnavailable(e.to_string()))
    }

    async fn call<T, F>(&self, build: F) -> Result<T, RegistryError>
    where
        T: Send + 'static,
        F: FnOnce(RpcReplyPort<T>) -> QueueMessage,
    {
        // ractor::rpc::call returns Result<CallResult<T>, MessagingErr<M>>
        match ractor::rpc::call(&self.actor, build, Some(self.reply_timeout)).await {
            Ok(CallResult::Success(value)) => Ok(value),
            Ok(CallResult::Timeout) => Err(RegistryError::Timeout),
            Ok(CallResult::SenderError) => Err(RegistryError::ReplyDropped),
            Err(e) => Err(RegistryError::ActorUnavailable(e.to_string())),
        }
    }
}

/// Start a queue worker with the given configuration.
pub async fn spawn_queue_worker(
    config: RegistryConfig,
) -> Result<(QueueHandle, tokio::task::JoinHandle<()>), ractor::SpawnErr> {
    let reply_timeout = config.reply_timeout();
    let (actor, handle) = Actor::spawn(config.name.clone(), QueueActor, config).await?;

    Ok((QueueHandle::new(actor, reply_timeout), handle))
}
