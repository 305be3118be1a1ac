//! Wires Diesel repositories into the services behind the GraphQL ports.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use transactions_subgraph::domain::{
    ExchangeCommandService, SessionLookupService, TransactionsQueryService,
};
use transactions_subgraph::inbound::graphql::GraphQLPorts;
use transactions_subgraph::outbound::persistence::{
    DbPool, DieselExchangeRepository, DieselProductRepository, DieselSessionRepository,
    DieselTransactionRepository,
};

/// Build the driving ports over one shared pool.
pub(crate) fn build_graphql_ports(pool: &DbPool) -> GraphQLPorts {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let exchange_repo = Arc::new(DieselExchangeRepository::new(pool.clone()));

    let sessions = SessionLookupService::new(
        Arc::new(DieselSessionRepository::new(pool.clone())),
        clock.clone(),
    );
    let transactions = TransactionsQueryService::new(
        Arc::new(DieselTransactionRepository::new(pool.clone())),
        exchange_repo.clone(),
    );
    let exchanges = ExchangeCommandService::new(
        exchange_repo,
        Arc::new(DieselProductRepository::new(pool.clone())),
        clock,
    );

    GraphQLPorts {
        sessions: Arc::new(sessions),
        transactions: Arc::new(transactions),
        exchanges: Arc::new(exchanges),
    }
}
