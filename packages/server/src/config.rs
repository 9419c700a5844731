//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use registry_core::{DropPolicy, RegistryConfig, StatusSource};

/// Job registry server.
#[derive(Debug, Parser)]
#[command(name = "job-registry", version, about)]
pub struct Args {
    /// Address the HTTP server listens on.
    #[arg(long, env = "JOB_REGISTRY_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Heartbeat interval in milliseconds (0 disables it).
    #[arg(long, env = "JOB_REGISTRY_HEARTBEAT_MS", default_value_t = 1_000)]
    pub heartbeat_ms: u64,

    /// How long status queries wait for the queue worker, in milliseconds.
    #[arg(long, env = "JOB_REGISTRY_REPLY_TIMEOUT_MS", default_value_t = 5_000)]
    pub reply_timeout_ms: u64,

    /// What to do with priority -1 jobs: `keep` or `on_enqueue`.
    #[arg(long, env = "JOB_REGISTRY_DROP_POLICY", default_value = "keep")]
    pub drop_policy: DropPolicy,

    /// Where single-job status answers come from: `request` or `queue`.
    #[arg(long, env = "JOB_REGISTRY_STATUS_SOURCE", default_value = "request")]
    pub status_source: StatusSource,
}

impl Args {
    /// Queue worker configuration for these arguments.
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::default()
            .with_name("queue-worker")
            .with_heartbeat_interval(Duration::from_millis(self.heartbeat_ms))
            .with_reply_timeout(Duration::from_millis(self.reply_timeout_ms))
            .with_drop_policy(self.drop_policy)
            .with_status_source(self.status_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_registry_defaults() {
        let args = Args::try_parse_from(["job-registry"]).unwrap();
        let config = args.registry_config();

        assert_eq!(args.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.name.as_deref(), Some("queue-worker"));
        assert_eq!(config.heartbeat_interval_ms, 1_000);
        assert_eq!(config.drop_policy, DropPolicy::Keep);
        assert_eq!(config.status_source, StatusSource::Request);
    }

    #[test]
    fn parses_policies() {
        let args = Args::try_parse_from([
            "job-registry",
            "--drop-policy",
            "on_enqueue",
            "--status-source",
            "queue",
            "--heartbeat-ms",
            "0",
        ])
        .unwrap();
        let config = args.registry_config();

        assert_eq!(config.drop_policy, DropPolicy::OnEnqueue);
        assert_eq!(config.status_source, StatusSource::Queue);
        assert_eq!(config.heartbeat_interval(), None);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(Args::try_parse_from(["job-registry", "--drop-policy", "later"]).is_err());
    }
}
