//! Queue actor owning the registered jobs.

use std::collections::VecDeque;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use registry_core::{
    DropPolicy, HeartbeatStats, JobId, JobRecord, JobStatus, QueueStats, RECENT_TICKS,
    RegistryConfig, RegistryError, ServiceId, StatusEntry, StatusSource,
};
use tokio::task::JoinHandle;

use crate::heartbeat::HeartbeatEmitter;
use crate::messages::QueueMessage;

/// State for the queue actor.
pub struct QueueActorState {
    /// Worker configuration.
    pub config: RegistryConfig,
    /// Registered jobs in arrival order.
    jobs: Vec<JobRecord>,
    /// Jobs discarded by the drop policy.
    dropped: u64,
    /// Ticks seen so far.
    ticks_observed: u64,
    /// Most recent tick markers, oldest first.
    recent_ticks: VecDeque<u64>,
    /// Heartbeat emitter task, if running.
    heartbeat: Option<JoinHandle<()>>,
}

impl QueueActorState {
    /// Create a new queue actor state.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            jobs: Vec::new(),
            dropped: 0,
            ticks_observed: 0,
            recent_ticks: VecDeque::with_capacity(RECENT_TICKS),
            heartbeat: None,
        }
    }

    fn find(&self, job_id: JobId) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    /// Append a job unless the drop policy discards it.
    fn enqueue(&mut self, job: JobRecord) {
        if job.is_marked_for_drop() && self.config.drop_policy == DropPolicy::OnEnqueue {
            tracing::warn!(job_id = %job.id, service = %job.service, "Dropping job marked for discard");
            self.dropped += 1;
            return;
        }

        tracing::debug!(
            job_id = %job.id,
            service = %job.service,
            priority = job.priority,
            follow_up = job.from_follow_up,
            "Job enqueued"
        );
        self.jobs.push(job);
    }

    fn status_of(&self, job: &JobRecord) -> JobStatus {
        match self.config.status_source {
            StatusSource::Request => job.status,
            StatusSource::Queue => self.find(job.id).map_or(job.status, |queued| queued.status),
        }
    }

    fn all_status(&self, service: &ServiceId) -> Vec<StatusEntry> {
        self.jobs
            .iter()
            .filter(|job| &job.service == service)
            .map(JobRecord::status_entry)
            .collect()
    }

    fn set_status(&mut self, job_id: JobId, status: JobStatus) -> Result<JobStatus, RegistryError> {
        let follow_ups = {
            let job = self
                .jobs
                .iter_mut()
                .find(|job| job.id == job_id)
                .ok_or(RegistryError::JobNotFound(job_id))?;

            let from = job.status;
            if !from.can_transition_to(status) {
                return Err(RegistryError::InvalidTransition {
                    job_id,
                    from,
                    to: status,
                });
            }
            if from == status {
                return Ok(status);
            }

            job.status = status;
            job.updated_at = Utc::now();
            tracing::debug!(%job_id, %from, to = %status, "Job status changed");

            if from < JobStatus::Running
                && let Some(slot) = &job.slot
            {
                slot.notify();
            }

            if status.is_terminal() {
                let parent = &*job;
                parent
                    .follow_up
                    .iter()
                    .map(|service| JobRecord::follow_up_of(parent, service.clone()))
                    .collect()
            } else {
                Vec::new()
            }
        };

        for follow_up in follow_ups {
            self.enqueue(follow_up);
        }

        Ok(status)
    }

    fn record_tick(&mut self, marker: u64) {
        self.ticks_observed = self.ticks_observed.wrapping_add(1);
        if self.recent_ticks.len() == RECENT_TICKS {
            self.recent_ticks.pop_front();
        }
        self.recent_ticks.push_back(marker);
    }

    fn stats(&self) -> QueueStats {
        let mut stats = QueueStats {
            dropped: self.dropped,
            heartbeat: HeartbeatStats {
                observed: self.ticks_observed,
                last_marker: self.recent_ticks.back().copied(),
                recent: self.recent_ticks.iter().copied().collect(),
            },
            ..QueueStats::default()
        };
        for job in &self.jobs {
            stats.count(job.status);
        }
        stats
    }
}

/// Queue actor: the single owner of the job queue.
pub struct QueueActor;

impl Actor for QueueActor {
    type Msg = QueueMessage;
    type State = QueueActorState;
    type Arguments = RegistryConfig;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            drop_policy = args.drop_policy.as_str(),
            status_source = args.status_source.as_str(),
            "Starting queue worker"
        );

        let mut state = QueueActorState::new(args);
        if let Some(interval) = state.config.heartbeat_interval() {
            state.heartbeat = Some(HeartbeatEmitter::new(interval).spawn(myself));
        }

        Ok(state)
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        if let Some(heartbeat) = state.heartbeat.take() {
            heartbeat.abort();
        }
        tracing::info!(queued = state.jobs.len(), "Queue worker stopped");
        Ok(())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            QueueMessage::Enqueue { job } => {
                state.enqueue(*job);
            }

            QueueMessage::GetStatus { job, reply } => {
                let _ = reply.send(state.status_of(&job));
            }

            QueueMessage::GetAllStatus { service, reply } => {
                let _ = reply.send(state.all_status(&service));
            }

            QueueMessage::SetStatus {
                job_id,
                status,
                reply,
            } => {
                let result = state.set_status(job_id, status);
                if let Err(e) = &result {
                    tracing::warn!("Rejected status change: {}", e);
                }
                let _ = reply.send(result);
            }

            QueueMessage::GetStats { reply } => {
                let _ = reply.send(state.stats());
            }

            QueueMessage::Tick { marker } => {
                tracing::debug!(marker, "QueueWorker: tick");
                state.record_tick(marker);
            }

            QueueMessage::Shutdown => {
                tracing::info!("Shutting down queue worker");
                myself.stop(None);
                return Ok(());
            }
        }

        Ok(())
    }
}
