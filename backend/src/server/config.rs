//! HTTP server configuration object and helpers.

use employee_gateway::settings::GatewayConfig;
use std::net::SocketAddr;
use tokio::sync::watch;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) gateway: GatewayConfig,
    pub(crate) shutdown: watch::Receiver<bool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    ///
    /// `shutdown` flips to `true` when the process starts draining; pending
    /// retry backoffs observe it and give up.
    #[must_use]
    pub fn new(gateway: GatewayConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            gateway,
            shutdown,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.gateway.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
