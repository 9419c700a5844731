#![allow(clippy::disallowed_methods)]

mod common;

use std::error::Error;
use std::time::Duration;

use actors::HeartbeatEmitter;

use common::{quiet_config, start_worker, stop_worker};

const INTERVAL: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn test_three_intervals_deliver_markers_zero_to_two() -> Result<(), Box<dyn Error>> {
    let config = quiet_config().with_heartbeat_interval(INTERVAL);
    let (queue, handle) = start_worker(config).await?;

    tokio::time::sleep(INTERVAL * 3 + INTERVAL / 2).await;

    let heartbeat = queue.stats().await?.heartbeat;
    assert_eq!(heartbeat.observed, 3);
    assert_eq!(heartbeat.recent, vec![0, 1, 2]);
    assert_eq!(heartbeat.last_marker, Some(2));

    stop_worker(queue, handle).await
}

#[tokio::test(start_paused = true)]
async fn test_markers_increase_by_one() -> Result<(), Box<dyn Error>> {
    let config = quiet_config().with_heartbeat_interval(INTERVAL);
    let (queue, handle) = start_worker(config).await?;

    tokio::time::sleep(INTERVAL * 10 + INTERVAL / 2).await;

    let heartbeat = queue.stats().await?.heartbeat;
    assert_eq!(heartbeat.observed, 10);
    assert!(heartbeat.recent.windows(2).all(|pair| pair[1] == pair[0] + 1));
    assert_eq!(heartbeat.recent.first(), Some(&0));

    stop_worker(queue, handle).await
}

#[tokio::test(start_paused = true)]
async fn test_ticks_leave_queue_untouched() -> Result<(), Box<dyn Error>> {
    let config = quiet_config().with_heartbeat_interval(INTERVAL);
    let (queue, handle) = start_worker(config).await?;

    tokio::time::sleep(INTERVAL * 5).await;

    let stats = queue.stats().await?;
    assert_eq!(stats.queued(), 0);
    assert!(stats.heartbeat.observed > 0);

    stop_worker(queue, handle).await
}

#[tokio::test(start_paused = true)]
async fn test_disabled_heartbeat_sends_nothing() -> Result<(), Box<dyn Error>> {
    let (queue, handle) = start_worker(quiet_config()).await?;

    tokio::time::sleep(Duration::from_secs(10)).await;

    let heartbeat = queue.stats().await?.heartbeat;
    assert_eq!(heartbeat.observed, 0);
    assert_eq!(heartbeat.last_marker, None);

    stop_worker(queue, handle).await
}

#[tokio::test(start_paused = true)]
async fn test_emitter_stops_with_worker() -> Result<(), Box<dyn Error>> {
    let (queue, handle) = start_worker(quiet_config()).await?;
    let emitter = HeartbeatEmitter::new(INTERVAL).spawn(queue.actor().clone());

    tokio::time::sleep(INTERVAL * 2 + INTERVAL / 2).await;
    assert_eq!(queue.stats().await?.heartbeat.observed, 2);

    stop_worker(queue, handle).await?;
    tokio::time::timeout(INTERVAL * 5, emitter).await??;

    Ok(())
}
