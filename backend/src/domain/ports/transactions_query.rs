//! Driving port for read-only access to transactions and exchanges.
//!
//! Filter keys arrive exactly as the caller sent them. Implementations
//! validate them and reject missing or malformed keys with `BadRequest`.

use async_trait::async_trait;

use crate::domain::{Error, Exchange, TransactionRecord};

/// Filter for the per-user listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListByUserRequest {
    /// User whose records are listed.
    pub user_id: Option<String>,
}

impl ListByUserRequest {
    /// Build a request for `user_id`.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// Key for the direct lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetByIdRequest {
    /// Record id as sent by the caller.
    pub id: Option<String>,
}

impl GetByIdRequest {
    /// Build a request for `id`.
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// Domain use-case port for transaction and exchange reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionsQuery: Send + Sync {
    /// Transactions owned by a user, newest first.
    async fn list_transactions(
        &self,
        request: ListByUserRequest,
    ) -> Result<Vec<TransactionRecord>, Error>;

    /// One transaction with its exchange, if any.
    async fn get_transaction(&self, request: GetByIdRequest) -> Result<TransactionRecord, Error>;

    /// Exchanges the user takes part in on either side, newest first.
    async fn list_exchanges(&self, request: ListByUserRequest) -> Result<Vec<Exchange>, Error>;

    /// One exchange.
    async fn get_exchange(&self, request: GetByIdRequest) -> Result<Exchange, Error>;
}
