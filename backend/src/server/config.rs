//! Command line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

use crate::domain::ReconcilePolicy;

/// Command line arguments, each overridable via the environment.
#[derive(Debug, Parser)]
#[command(name = "tms-backend", about = "Shipment tracking REST API", version)]
pub struct Cli {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "TMS_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// HMAC key for signing bearer tokens. Login fails with a configuration
    /// error when unset.
    #[arg(long, env = "TMS_SIGNING_KEY")]
    pub signing_key: Option<String>,

    /// Reproduce the legacy update behaviour that stops reconciling at the
    /// first differing field instead of applying every difference.
    #[arg(long, env = "TMS_LEGACY_RECONCILE")]
    pub legacy_reconcile: bool,
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_key: Option<String>,
    pub(crate) reconcile_policy: ReconcilePolicy,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing_key: Option<String>) -> Self {
        Self {
            bind_addr,
            signing_key,
            reconcile_policy: ReconcilePolicy::default(),
        }
    }

    /// Override the update reconcile policy.
    #[must_use]
    pub fn with_reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile_policy = policy;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        let policy = if cli.legacy_reconcile {
            ReconcilePolicy::FirstDifference
        } else {
            ReconcilePolicy::default()
        };
        Self::new(cli.bind_addr, cli.signing_key).with_reconcile_policy(policy)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_with_the_corrected_policy() {
        let cli = Cli::try_parse_from(["tms-backend"]).expect("defaults parse");
        let config = ServerConfig::from(cli);

        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert!(config.signing_key.is_none());
        assert_eq!(config.reconcile_policy, ReconcilePolicy::AllFields);
    }

    #[test]
    fn legacy_flag_selects_first_difference_reconciling() {
        let cli = Cli::try_parse_from(["tms-backend", "--legacy-reconcile"])
            .expect("flag parses");
        let config = ServerConfig::from(cli);

        assert_eq!(config.reconcile_policy, ReconcilePolicy::FirstDifference);
    }

    #[test]
    fn signing_key_and_bind_addr_are_accepted() {
        let cli = Cli::try_parse_from([
            "tms-backend",
            "--bind-addr",
            "127.0.0.1:9090",
            "--signing-key",
            "s3cret",
        ])
        .expect("arguments parse");
        let config = ServerConfig::from(cli);

        assert_eq!(config.bind_addr(), "127.0.0.1:9090".parse().expect("addr"));
        assert_eq!(config.signing_key.as_deref(), Some("s3cret"));
    }
}
