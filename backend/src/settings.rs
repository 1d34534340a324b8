//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EMPLOYEE_GATEWAY_*` environment variables
//! and configuration files. Unset values fall back to the defaults below;
//! [`GatewaySettings::resolve`] validates everything once at start-up.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::retry::RetryPolicy;
use crate::outbound::employee_store::HttpEmployeeStoreConfig;

const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8112/api/v1/employee";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8111";

/// Raw configuration values for the gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEE_GATEWAY")]
pub struct GatewaySettings {
    /// Collection URL of the upstream employee service.
    pub upstream_base_url: Option<String>,
    /// Connect timeout per upstream attempt, in milliseconds.
    #[ortho_config(default = 10_000)]
    pub connect_timeout_ms: u64,
    /// Read timeout per upstream attempt, in milliseconds.
    #[ortho_config(default = 10_000)]
    pub read_timeout_ms: u64,
    /// Attempts per upstream operation, including the first.
    #[ortho_config(default = 3)]
    pub max_attempts: u32,
    /// Backoff unit; the wait after attempt `k` is `k` units.
    #[ortho_config(default = 1_000)]
    pub base_delay_ms: u64,
    /// Socket address the facade listens on.
    pub bind_addr: Option<String>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            upstream_base_url: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            bind_addr: None,
        }
    }
}

/// Invalid configuration detected at start-up.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The upstream URL does not parse or cannot carry a path.
    #[error("invalid upstream base URL {value:?}: {message}")]
    InvalidUpstreamUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A value that must be positive was zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Setting name.
        field: &'static str,
    },
}

/// Validated configuration ready for wiring.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream adapter settings.
    pub upstream: HttpEmployeeStoreConfig,
    /// Retry policy for every upstream operation.
    pub retry: RetryPolicy,
    /// Listener address.
    pub bind_addr: SocketAddr,
}

impl GatewaySettings {
    /// Configured upstream URL, falling back to the local default.
    pub fn upstream_base_url(&self) -> &str {
        self.upstream_base_url
            .as_deref()
            .unwrap_or(DEFAULT_UPSTREAM_BASE_URL)
    }

    /// Configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Configured read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Configured attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Configured backoff unit.
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Configured listener address.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Validate every value and produce the wiring configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for an unparsable URL or bind address, or a
    /// zero attempt budget or timeout.
    pub fn resolve(&self) -> Result<GatewayConfig, SettingsError> {
        let base_url = parse_upstream_url(self.upstream_base_url())?;
        let bind_addr =
            self.bind_addr()
                .parse()
                .map_err(|source| SettingsError::InvalidBindAddr {
                    value: self.bind_addr().to_owned(),
                    source,
                })?;

        let connect_timeout = non_zero(self.connect_timeout(), "connect_timeout_ms")?;
        let read_timeout = non_zero(self.read_timeout(), "read_timeout_ms")?;
        if self.max_attempts() == 0 {
            return Err(SettingsError::Zero {
                field: "max_attempts",
            });
        }

        Ok(GatewayConfig {
            upstream: HttpEmployeeStoreConfig {
                base_url,
                connect_timeout,
                read_timeout,
            },
            retry: RetryPolicy {
                max_attempts: self.max_attempts(),
                base_delay: self.base_delay(),
            },
            bind_addr,
        })
    }
}

fn parse_upstream_url(value: &str) -> Result<Url, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidUpstreamUrl {
        value: value.to_owned(),
        message,
    };
    let url = Url::parse(value).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}

fn non_zero(value: Duration, field: &'static str) -> Result<Duration, SettingsError> {
    if value.is_zero() {
        Err(SettingsError::Zero { field })
    } else {
        Ok(value)
    }
}
