use std::error::Error;
use std::time::Duration;

use actors::{QueueHandle, spawn_queue_worker};
use registry_core::RegistryConfig;
use tokio::task::JoinHandle;

/// Worker config with the heartbeat switched off.
pub fn quiet_config() -> RegistryConfig {
    RegistryConfig::default()
        .with_heartbeat_interval(Duration::ZERO)
        .with_reply_timeout(Duration::from_secs(2))
}

pub async fn start_worker(
    config: RegistryConfig,
) -> Result<(QueueHandle, JoinHandle<()>), Box<dyn Error>> {
    Ok(spawn_queue_worker(config).await?)
}

/// Stop the worker and wait for it to exit.
#[allow(dead_code)]
pub async fn stop_worker(queue: QueueHandle, handle: JoinHandle<()>) -> Result<(), Box<dyn Error>> {
    queue.shutdown()?;
    tokio::time::timeout(Duration::from_secs(2), handle).await??;
    Ok(())
}
