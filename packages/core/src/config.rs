//! Configuration for the queue worker.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// What the queue worker does with a job whose priority is
/// [`DROP_PRIORITY`](crate::DROP_PRIORITY).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Queue it anyway; the priority is inert data.
    #[default]
    Keep,
    /// Discard it when it is enqueued.
    OnEnqueue,
}

impl DropPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropPolicy::Keep => "keep",
            DropPolicy::OnEnqueue => "on_enqueue",
        }
    }
}

impl FromStr for DropPolicy {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(DropPolicy::Keep),
            "on_enqueue" | "on-enqueue" => Ok(DropPolicy::OnEnqueue),
            other => Err(RegistryError::InvalidConfig(format!(
                "unknown drop policy '{}'",
                other
            ))),
        }
    }
}

/// Where a single-job status query reads the status from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    /// Echo the status carried by the request record.
    #[default]
    Request,
    /// Look the job up in the queue by id and report its live status.
    Queue,
}

impl StatusSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusSource::Request => "request",
            StatusSource::Queue => "queue",
        }
    }
}

impl FromStr for StatusSource {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(StatusSource::Request),
            "queue" => Ok(StatusSource::Queue),
            other => Err(RegistryError::InvalidConfig(format!(
                "unknown status source '{}'",
                other
            ))),
        }
    }
}

/// Configuration for the queue worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Actor name to register under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Heartbeat interval in milliseconds; 0 disables the heartbeat.
    pub heartbeat_interval_ms: u64,
    /// How long a caller waits for a query reply, in milliseconds.
    pub reply_timeout_ms: u64,
    /// Handling of jobs marked for drop.
    pub drop_policy: DropPolicy,
    /// Source of single-job status answers.
    pub status_source: StatusSource,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: None,
            heartbeat_interval_ms: 1_000,
            reply_timeout_ms: 5_000,
            drop_policy: DropPolicy::default(),
            status_source: StatusSource::default(),
        }
    }
}

impl RegistryConfig {
    /// Register the actor under a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the heartbeat interval; `Duration::ZERO` disables it.
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the reply timeout for queries.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the drop policy.
    pub fn with_drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Set the status source.
    pub fn with_status_source(mut self, source: StatusSource) -> Self {
        self.status_source = source;
        self
    }

    /// Heartbeat interval, or `None` when disabled.
    pub fn heartbeat_interval(&self) -> Option<Duration> {
        (self.heartbeat_interval_ms > 0).then(|| Duration::from_millis(self.heartbeat_interval_ms))
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}
