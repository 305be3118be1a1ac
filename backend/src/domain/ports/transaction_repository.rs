//! Port for reading ledger transactions.

use async_trait::async_trait;

use crate::domain::{TransactionId, TransactionRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by transaction repository adapters.
    pub enum TransactionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "transaction repository connection failed: {message}",
        /// Query failed during execution, or a stored row did not decode.
        Query { message: String } =>
            "transaction repository query failed: {message}",
    }
}

/// Read access to transactions and their linked exchanges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// All transactions of `user_id`, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TransactionRecord>, TransactionRepositoryError>;

    /// One transaction by id.
    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, TransactionRepositoryError>;
}
