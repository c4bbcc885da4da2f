//! Lornu AI Hello Pod
//!
//! Small demonstration service for Kubernetes. It reports the identity of the
//! pod that served each request and offers a CPU-burn endpoint for exercising
//! the horizontal pod autoscaler.
//!
//! ## Routes
//!
//! - `GET /`: greeting with pod identity
//! - `GET /health`, `GET /ready`: liveness and readiness probes
//! - `GET /compute?duration=<secs>`: burn CPU for up to 60 seconds
//! - `GET /metrics`, `GET /info`: identity snapshots
//!
//! Unknown routes answer 404, other methods on known routes 405, bad input
//! 400 and faults 500, always as JSON.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod compute;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;

pub use config::PodIdentity;
pub use error::{ApiError, ApiRejection};

/// Routes without the outer layers.
fn routes(identity: Arc<PodIdentity>) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/compute", get(handlers::compute))
        .route("/metrics", get(handlers::metrics))
        .route("/info", get(handlers::info))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(identity)
}

/// Wrap a router with the layers every response goes through.
pub fn with_layers(router: Router, identity: &PodIdentity) -> Router {
    let pod_name = identity.pod_name.clone();

    router
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            error::panic_response(&pod_name, panic)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Build the full application for the given identity.
pub fn app(identity: PodIdentity) -> Router {
    let layered_for = identity.clone();
    with_layers(routes(Arc::new(identity)), &layered_for)
}

/// Bind `0.0.0.0:<port>` and serve until the process exits.
pub async fn serve(identity: PodIdentity) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], identity.port));
    let pod_name = identity.pod_name.clone();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting hello-pod on pod {} at {}", pod_name, addr);

    axum::serve(listener, app(identity))
        .await
        .context("Server error")?;

    Ok(())
}
