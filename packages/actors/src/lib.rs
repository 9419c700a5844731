//! Actor system for the job registry.
//!
//! This crate provides the Ractor-based queue worker that owns every
//! registered job, plus the heartbeat that keeps it ticking.
//!
//! # Architecture
//!
//! - `QueueActor` - Single owner of the job queue; answers status queries
//! - `HeartbeatEmitter` - Sends a numbered tick into the worker every interval
//! - `QueueHandle` - Typed client used by every producer
//!
//! # Usage
//!
//! ```ignore
//! use actors::spawn_queue_worker;
//! use registry_core::{JobRecord, RegistryConfig};
//!
//! let (queue, handle) = spawn_queue_worker(RegistryConfig::default()).await?;
//! queue.enqueue(JobRecord::new("svc-1").with_priority(5))?;
//! let entries = queue.all_status("svc-1").await?;
//! ```

mod handle;
mod heartbeat;
mod messages;
mod queue_actor;

pub use handle::{QueueHandle, spawn_queue_worker};
pub use heartbeat::{HeartbeatEmitter, TickCounter};
pub use messages::QueueMessage;
pub use queue_actor::{QueueActor, QueueActorState};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef, RpcReplyPort, concurrency};
