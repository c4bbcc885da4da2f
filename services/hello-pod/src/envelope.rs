//! JSON response bodies.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::compute::Burn;
use crate::config::PodIdentity;

pub const GREETING: &str = "Hello, World!";
pub const COMPUTE_DONE: &str = "Computation completed";
pub const API_VERSION: &str = "1.0";

/// Rust toolchain this binary was built with.
pub const RUST_VERSION: &str = env!("HELLO_POD_RUSTC_VERSION");

/// Current UTC time as RFC 3339 with microseconds, e.g. `2026-10-16T08:30:00.123456Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, Serialize)]
pub struct Greeting {
    pub message: &'static str,
    pub pod_name: String,
    pub pod_namespace: String,
    pub pod_ip: String,
    pub timestamp: String,
    pub version: &'static str,
}

impl Greeting {
    pub fn new(identity: &PodIdentity) -> Self {
        Self {
            message: GREETING,
            pod_name: identity.pod_name.clone(),
            pod_namespace: identity.pod_namespace.clone(),
            pod_ip: identity.pod_ip.clone(),
            timestamp: timestamp(),
            version: API_VERSION,
        }
    }
}

/// Body shared by the liveness and readiness probes.
#[derive(Debug, Clone, Serialize)]
pub struct Probe {
    pub status: &'static str,
    pub pod_name: String,
    pub timestamp: String,
}

impl Probe {
    pub fn healthy(identity: &PodIdentity) -> Self {
        Self::with_status("healthy", identity)
    }

    pub fn ready(identity: &PodIdentity) -> Self {
        Self::with_status("ready", identity)
    }

    fn with_status(status: &'static str, identity: &PodIdentity) -> Self {
        Self {
            status,
            pod_name: identity.pod_name.clone(),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComputeReport {
    pub message: &'static str,
    pub pod_name: String,
    pub duration_requested: f64,
    pub duration_actual: f64,
    pub result: u64,
    pub timestamp: String,
}

impl ComputeReport {
    pub fn new(identity: &PodIdentity, burn: &Burn) -> Self {
        Self {
            message: COMPUTE_DONE,
            pod_name: identity.pod_name.clone(),
            duration_requested: burn.requested,
            duration_actual: burn.elapsed_rounded(),
            result: burn.result,
            timestamp: timestamp(),
        }
    }
}

/// Identity snapshot served by `/metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub pod_name: String,
    pub pod_namespace: String,
    pub pod_ip: String,
    pub timestamp: String,
}

impl Snapshot {
    pub fn new(identity: &PodIdentity) -> Self {
        Self {
            pod_name: identity.pod_name.clone(),
            pod_namespace: identity.pod_namespace.clone(),
            pod_ip: identity.pod_ip.clone(),
            timestamp: timestamp(),
        }
    }
}

/// Identity snapshot plus build information, served by `/info`.
#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub pod_name: String,
    pub pod_namespace: String,
    pub pod_ip: String,
    pub rust_version: &'static str,
    pub service_version: &'static str,
    pub timestamp: String,
}

impl Info {
    pub fn new(identity: &PodIdentity) -> Self {
        Self {
            pod_name: identity.pod_name.clone(),
            pod_namespace: identity.pod_namespace.clone(),
            pod_ip: identity.pod_ip.clone(),
            rust_version: RUST_VERSION,
            service_version: env!("CARGO_PKG_VERSION"),
            timestamp: timestamp(),
        }
    }
}
