//! Route handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use tracing::info;

use crate::compute;
use crate::config::PodIdentity;
use crate::envelope::{ComputeReport, Greeting, Info, Probe, Snapshot};
use crate::error::{ApiError, ApiRejection};

pub async fn hello(State(identity): State<Arc<PodIdentity>>) -> Json<Greeting> {
    info!("Request received on pod {}", identity.pod_name);
    Json(Greeting::new(&identity))
}

/// Liveness probe. Nothing is checked: if we can answer, we're alive.
pub async fn health(State(identity): State<Arc<PodIdentity>>) -> Json<Probe> {
    Json(Probe::healthy(&identity))
}

/// Readiness probe. There are no dependencies to wait on.
pub async fn ready(State(identity): State<Arc<PodIdentity>>) -> Json<Probe> {
    Json(Probe::ready(&identity))
}

pub async fn compute(
    State(identity): State<Arc<PodIdentity>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ComputeReport>, ApiRejection> {
    info!("Compute request received on pod {}", identity.pod_name);

    let reject = |e: ApiError| ApiRejection::new(e, identity.pod_name.clone());

    let secs = compute::parse_duration(params.get("duration").map(String::as_str))
        .map_err(reject)?;

    // The burn holds its thread for up to a minute; keep it off the runtime
    // workers so probes still get answered.
    let burn = tokio::task::spawn_blocking(move || compute::burn(secs))
        .await
        .map_err(|e| reject(ApiError::Internal(anyhow::Error::new(e).context("compute task failed"))))?;

    info!(
        "Computation completed on pod {} in {:.2}s",
        identity.pod_name,
        burn.elapsed.as_secs_f64()
    );

    Ok(Json(ComputeReport::new(&identity, &burn)))
}

pub async fn metrics(State(identity): State<Arc<PodIdentity>>) -> Json<Snapshot> {
    Json(Snapshot::new(&identity))
}

pub async fn info(State(identity): State<Arc<PodIdentity>>) -> Json<Info> {
    Json(Info::new(&identity))
}

pub async fn not_found(State(identity): State<Arc<PodIdentity>>) -> ApiRejection {
    ApiRejection::new(ApiError::NotFound, identity.pod_name.clone())
}

pub async fn method_not_allowed(State(identity): State<Arc<PodIdentity>>) -> ApiRejection {
    ApiRejection::new(ApiError::MethodNotAllowed, identity.pod_name.clone())
}
