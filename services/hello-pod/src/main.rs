//! Lornu AI Hello Pod
//!
//! Serves pod identity and a CPU-burn endpoint for autoscaling demos.
//!
//! # Usage
//! ```bash
//! # Inside a pod, identity comes from the downward API
//! POD_NAME=worker-3 POD_NAMESPACE=demo hello-pod
//!
//! # Locally
//! hello-pod --port 9090 --log-format pretty
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use hello_pod::config::{DEFAULT_POD_NAME, DEFAULT_POD_NAMESPACE, DEFAULT_PORT};
use hello_pod::PodIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Parser, Debug)]
#[command(name = "hello-pod")]
#[command(about = "Lornu AI Hello Pod", long_about = None)]
#[command(version)]
struct Cli {
    /// Pod name reported in every response
    #[arg(long, env = "POD_NAME", default_value = DEFAULT_POD_NAME)]
    pod_name: String,

    /// Pod namespace
    #[arg(long, env = "POD_NAMESPACE", default_value = DEFAULT_POD_NAMESPACE)]
    pod_namespace: String,

    /// Pod IP (default: resolve the local hostname)
    #[arg(long, env = "POD_IP")]
    pod_ip: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(format: LogFormat, verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format, cli.verbose);

    let identity = PodIdentity::new(cli.pod_name, cli.pod_namespace, cli.pod_ip, cli.port);

    hello_pod::serve(identity).await
}
