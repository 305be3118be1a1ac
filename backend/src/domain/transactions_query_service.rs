//! Read-side service for transactions and exchanges.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::ports::{
    ExchangeRepository, ExchangeRepositoryError, GetByIdRequest, ListByUserRequest,
    TransactionRepository, TransactionRepositoryError, TransactionsQuery,
};
use crate::domain::{
    Error, Exchange, ExchangeId, RecordIdValidationError, TransactionId, TransactionRecord, UserId,
};

/// Service implementing [`TransactionsQuery`] over the two repositories.
#[derive(Clone)]
pub struct TransactionsQueryService<T, E> {
    transaction_repo: Arc<T>,
    exchange_repo: Arc<E>,
}

impl<T, E> TransactionsQueryService<T, E> {
    /// Create a new query service.
    pub fn new(transaction_repo: Arc<T>, exchange_repo: Arc<E>) -> Self {
        Self {
            transaction_repo,
            exchange_repo,
        }
    }
}

pub(crate) fn map_transaction_error(error: TransactionRepositoryError) -> Error {
    error!(%error, "transaction repository failure");
    Error::internal("transaction store unavailable")
}

pub(crate) fn map_exchange_error(error: ExchangeRepositoryError) -> Error {
    error!(%error, "exchange repository failure");
    Error::internal("exchange store unavailable")
}

pub(crate) fn invalid_id(error: RecordIdValidationError) -> Error {
    Error::bad_request(error.to_string())
}

fn required_user(request: ListByUserRequest) -> Result<UserId, Error> {
    let raw = request
        .user_id
        .ok_or_else(|| Error::bad_request("userId is required"))?;
    UserId::new(raw.trim()).map_err(|err| Error::bad_request(format!("invalid userId: {err}")))
}

fn required_id(request: &GetByIdRequest) -> Result<&str, RecordIdValidationError> {
    request
        .id
        .as_deref()
        .ok_or(RecordIdValidationError::Missing { field: "id" })
}

#[async_trait]
impl<T, E> TransactionsQuery for TransactionsQueryService<T, E>
where
    T: TransactionRepository,
    E: ExchangeRepository,
{
    async fn list_transactions(
        &self,
        request: ListByUserRequest,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let user_id = required_user(request)?;
        self.transaction_repo
            .list_for_user(&user_id)
            .await
            .map_err(map_transaction_error)
    }

    async fn get_transaction(&self, request: GetByIdRequest) -> Result<TransactionRecord, Error> {
        let id = required_id(&request)
            .and_then(TransactionId::parse)
            .map_err(invalid_id)?;
        self.transaction_repo
            .find_by_id(id)
            .await
            .map_err(map_transaction_error)?
            .ok_or_else(|| Error::not_found(format!("transaction {id} not found")))
    }

    async fn list_exchanges(&self, request: ListByUserRequest) -> Result<Vec<Exchange>, Error> {
        let user_id = required_user(request)?;
        self.exchange_repo
            .list_for_participant(&user_id)
            .await
            .map_err(map_exchange_error)
    }

    async fn get_exchange(&self, request: GetByIdRequest) -> Result<Exchange, Error> {
        let id = required_id(&request)
            .and_then(ExchangeId::parse)
            .map_err(invalid_id)?;
        self.exchange_repo
            .find_by_id(id)
            .await
            .map_err(map_exchange_error)?
            .ok_or_else(|| Error::not_found(format!("exchange {id} not found")))
    }
}

#[cfg(test)]
#[path = "transactions_query_service_tests.rs"]
mod tests;
