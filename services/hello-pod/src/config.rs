//! Pod identity
//!
//! Kubernetes exposes the pod's name, namespace and IP to the container
//! through the downward API as environment variables. Anything missing is
//! defaulted here; nothing is validated beyond that.

use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use tracing::{debug, warn};

pub const DEFAULT_POD_NAME: &str = "unknown-pod";
pub const DEFAULT_POD_NAMESPACE: &str = "default";
pub const DEFAULT_PORT: u16 = 8080;

/// Identity of the running pod, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodIdentity {
    pub pod_name: String,
    pub pod_namespace: String,
    pub pod_ip: String,
    pub port: u16,
}

impl PodIdentity {
    /// Build an identity, resolving the local host address when no pod IP is given.
    pub fn new(
        pod_name: impl Into<String>,
        pod_namespace: impl Into<String>,
        pod_ip: Option<String>,
        port: u16,
    ) -> Self {
        let pod_ip = match pod_ip.filter(|ip| !ip.is_empty()) {
            Some(ip) => ip,
            None => local_ip().to_string(),
        };

        Self {
            pod_name: pod_name.into(),
            pod_namespace: pod_namespace.into(),
            pod_ip,
            port,
        }
    }
}

impl Default for PodIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_POD_NAME, DEFAULT_POD_NAMESPACE, None, DEFAULT_PORT)
    }
}

/// Resolve this machine's hostname to an address, preferring IPv4.
///
/// Falls back to loopback when the hostname is unknown or does not resolve.
pub(crate) fn local_ip() -> IpAddr {
    let Some(host) = hostname() else {
        warn!("Hostname unavailable, reporting loopback as pod IP");
        return IpAddr::V4(Ipv4Addr::LOCALHOST);
    };

    match (host.as_str(), 0).to_socket_addrs() {
        Ok(addrs) => {
            let addrs: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
            let ip = addrs
                .iter()
                .find(|ip| ip.is_ipv4())
                .or_else(|| addrs.first())
                .copied()
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
            debug!("Resolved hostname {} to {}", host, ip);
            ip
        }
        Err(e) => {
            warn!("Failed to resolve hostname {}: {}", host, e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn hostname() -> Option<String> {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}
