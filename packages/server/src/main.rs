//! Job registry server: queue worker plus HTTP transport.

mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Initializing job registry...");
    let (queue, worker) = actors::spawn_queue_worker(args.registry_config()).await?;

    api::serve(args.bind, shutdown_signal()).await?;

    tracing::info!("HTTP server stopped, draining queue worker");
    queue.shutdown()?;
    worker.await?;

    tracing::info!("Job registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl-C, initiating graceful shutdown");
}
