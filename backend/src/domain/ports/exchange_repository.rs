//! Port for exchange persistence.
//!
//! Exchange creation writes two rows; adapters must commit them atomically.

use async_trait::async_trait;

use crate::domain::{Exchange, ExchangeForTransition, ExchangeId, NewExchange, StatusUpdate, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exchange repository adapters.
    pub enum ExchangeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exchange repository connection failed: {message}",
        /// Query or mutation failed, or a stored row did not decode.
        Query { message: String } =>
            "exchange repository query failed: {message}",
    }
}

/// Read and write access to exchanges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRepository: Send + Sync {
    /// Exchanges where `user_id` owns the offered or the requested product,
    /// newest first.
    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Exchange>, ExchangeRepositoryError>;

    /// One exchange by id.
    async fn find_by_id(&self, id: ExchangeId) -> Result<Option<Exchange>, ExchangeRepositoryError>;

    /// One exchange with the users entitled to change it.
    async fn find_for_transition(
        &self,
        id: ExchangeId,
    ) -> Result<Option<ExchangeForTransition>, ExchangeRepositoryError>;

    /// Insert the `EXCHANGE` transaction and the `PENDING` exchange in one
    /// database transaction.
    async fn create(&self, exchange: &NewExchange) -> Result<Exchange, ExchangeRepositoryError>;

    /// Apply a status update. Returns `None` if the row vanished.
    async fn update_status(
        &self,
        id: ExchangeId,
        update: StatusUpdate,
    ) -> Result<Option<Exchange>, ExchangeRepositoryError>;
}
