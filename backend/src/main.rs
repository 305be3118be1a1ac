//! Transactions subgraph entry-point: loads settings, connects to
//! PostgreSQL and serves `/graphql`.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use transactions_subgraph::inbound::http::health::HealthState;
use transactions_subgraph::outbound::persistence::{DbPool, run_pending_migrations};

use server::{
    AppSettings, ServerConfig, build_graphql_ports, create_server, shutdown_on, termination_signal,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let pool_config = settings
        .pool_config()
        .ok_or_else(|| eyre!("TRANSACTIONS_DATABASE_URL must be set"))?;

    if settings.run_migrations {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply migrations")?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    let ports = build_graphql_ports(&pool);
    let bind_addr = settings.bind_addr();

    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr, ports);
    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, ports, make_metrics()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    actix_web::rt::spawn(shutdown_on(
        termination_signal(),
        health_state,
        server.handle(),
    ));
    info!(%bind_addr, "transactions subgraph listening");
    server.await.wrap_err("server terminated")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("transactions_subgraph")
        .endpoint("/metrics")
        .build()
        .map_err(|e| eyre!("failed to configure Prometheus metrics: {e}"))
}
