//! Driving port for exchange mutations.
//!
//! Every operation acts on behalf of an authenticated user.

use async_trait::async_trait;

use crate::domain::{Error, Exchange, ExchangeStatus, UserId};

/// Input for [`ExchangeCommand::create_exchange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExchangeRequest {
    /// Product the actor offers. Must belong to the actor.
    pub offered_product_id: i32,
    /// Product the actor wants. Must belong to someone else and be
    /// exchangeable.
    pub requested_product_id: i32,
    /// Free-form notes for the other party.
    pub notes: Option<String>,
}

/// Input for [`ExchangeCommand::update_exchange_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateExchangeStatusRequest {
    /// Exchange id as sent by the caller.
    pub exchange_id: String,
    /// Target status.
    pub status: ExchangeStatus,
}

/// Domain use-case port for creating and transitioning exchanges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeCommand: Send + Sync {
    /// Create a pending exchange and its ledger transaction.
    async fn create_exchange(
        &self,
        actor: &UserId,
        request: CreateExchangeRequest,
    ) -> Result<Exchange, Error>;

    /// Move an exchange to a new status.
    async fn update_exchange_status(
        &self,
        actor: &UserId,
        request: UpdateExchangeStatusRequest,
    ) -> Result<Exchange, Error>;

    /// Cancel an exchange. Only its initiator may do so.
    async fn cancel_exchange(&self, actor: &UserId, exchange_id: String)
    -> Result<Exchange, Error>;
}
