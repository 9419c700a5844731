//! Core domain types for the job registry.
//!
//! This crate contains shared types used across all packages:
//! - ServiceId, JobRecord and JobStatus for registered work
//! - QueueStats for queue worker snapshots
//! - RegistryConfig for queue worker behavior

mod config;
mod error;
mod job;
mod queue;
mod service;

pub use config::{DropPolicy, RegistryConfig, StatusSource};
pub use error::RegistryError;
pub use job::{DROP_PRIORITY, JobId, JobRecord, JobStatus, SlotSignal, StatusEntry};
pub use queue::{HeartbeatStats, QueueStats, RECENT_TICKS};
pub use service::ServiceId;
