//! Per-request GraphQL context.

use std::sync::Arc;

use crate::domain::ports::{ExchangeCommand, SessionLookup, TransactionsQuery};
use crate::domain::{Error, SessionToken, UserId};

/// Driving ports shared by every request.
#[derive(Clone)]
pub struct GraphQLPorts {
    /// Bearer-token authentication.
    pub sessions: Arc<dyn SessionLookup>,
    /// Transaction and exchange reads.
    pub transactions: Arc<dyn TransactionsQuery>,
    /// Exchange mutations.
    pub exchanges: Arc<dyn ExchangeCommand>,
}

/// Context handed to every resolver.
///
/// The token is only checked when a resolver asks for the current user, so
/// public queries work without one.
pub struct GraphQLContext {
    ports: GraphQLPorts,
    token: Option<SessionToken>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    /// Build a context for one request.
    pub fn new(ports: GraphQLPorts, token: Option<SessionToken>) -> Self {
        Self { ports, token }
    }

    /// Read-side port.
    pub fn transactions(&self) -> &dyn TransactionsQuery {
        self.ports.transactions.as_ref()
    }

    /// Mutation port.
    pub fn exchanges(&self) -> &dyn ExchangeCommand {
        self.ports.exchanges.as_ref()
    }

    /// Resolve the caller, failing `Unauthorized` without a valid session.
    pub async fn require_user(&self) -> Result<UserId, Error> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| Error::unauthorized("authentication required"))?;
        self.ports.sessions.authenticate(token).await
    }
}
