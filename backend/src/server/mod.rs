//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};
pub(crate) use state_builders::build_graphql_ports;

use std::future::Future;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use transactions_subgraph::Trace;
use transactions_subgraph::inbound::graphql::{GraphQLPorts, Schema, schema};
use transactions_subgraph::inbound::http::graphql::{graphql, index};
use transactions_subgraph::inbound::http::health::{HealthState, live, ready};
use transactions_subgraph::inbound::http::json_config;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    schema: web::Data<Schema>,
    ports: web::Data<GraphQLPorts>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        schema,
        ports,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(schema)
        .app_data(ports)
        .app_data(json_config())
        .wrap(Trace)
        .service(index)
        .service(graphql)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        ports,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let schema = web::Data::new(schema());
    let ports = web::Data::new(ports);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            schema: schema.clone(),
            ports: ports.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
pub(crate) async fn termination_signal() {
    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Once `signal` resolves, fail the liveness check and stop the server
/// gracefully.
///
/// Signal handling is disabled on the Actix server so that the checks flip
/// before in-flight requests drain.
pub(crate) async fn shutdown_on<F>(
    signal: F,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested, draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn shutdown_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app_state = health_state.clone();
        let server = HttpServer::new(move || App::new().app_data(app_state.clone()).service(live))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        shutdown_on(async {}, health_state.clone(), handle).await;

        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
        assert!(!health_state.is_alive());
    }
}
