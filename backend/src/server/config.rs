//! Process settings loaded via OrthoConfig and the runtime server config.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use transactions_subgraph::inbound::graphql::GraphQLPorts;
use transactions_subgraph::outbound::persistence::PoolConfig;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_PORT: u16 = 4004;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Settings read from `TRANSACTIONS_*` variables, config files and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRANSACTIONS")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Interface to listen on.
    pub bind_address: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Upper bound on pooled connections; defaults to 10.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm; defaults to 2.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection; defaults to 30.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Socket address built from the bind address and port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_address
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool settings, or `None` when no database URL was supplied.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_connection_timeout_secs
                        .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
                )),
        )
    }
}

/// Everything `create_server` needs once the pool is up.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: GraphQLPorts,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    /// Server configuration for the given address and ports.
    #[cfg(not(feature = "metrics"))]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: GraphQLPorts) -> Self {
        Self { bind_addr, ports }
    }

    /// Server configuration that also serves `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: GraphQLPorts, prometheus: PrometheusMetrics) -> Self {
        Self {
            bind_addr,
            ports,
            prometheus,
        }
    }
}
