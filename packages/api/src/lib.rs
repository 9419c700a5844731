//! HTTP transport for the job registry.
//!
//! A thin adapter in front of the queue worker:
//! - `POST /register` decodes a registration payload and acknowledges it

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::post;

mod register;

pub use register::{ApiError, RegisterRequest, register};

/// Build the HTTP router.
pub fn router() -> Router {
    Router::new().route("/register", post(register))
}

/// Serve the router on `addr` until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Starting HTTP server");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
}
