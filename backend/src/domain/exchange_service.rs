//! Exchange command service.
//!
//! Creation checks both products before anything is written, then hands the
//! two inserts to the repository as one unit. Status changes go through
//! [`plan_status_update`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateExchangeRequest, ExchangeCommand, ExchangeRepository, ProductRepository,
    ProductRepositoryError, UpdateExchangeStatusRequest,
};
use crate::domain::transactions_query_service::{invalid_id, map_exchange_error};
use crate::domain::{
    EXCHANGE_REWARD_POINTS, Error, Exchange, ExchangeId, ExchangeStatus, NewExchange, ProductId,
    ProductSnapshot, TransitionDenied, UserId, plan_status_update,
};

/// Service implementing [`ExchangeCommand`].
#[derive(Clone)]
pub struct ExchangeCommandService<E, P> {
    exchange_repo: Arc<E>,
    product_repo: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<E, P> ExchangeCommandService<E, P> {
    /// Create a new command service.
    pub fn new(exchange_repo: Arc<E>, product_repo: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exchange_repo,
            product_repo,
            clock,
        }
    }
}

fn map_product_error(error: ProductRepositoryError) -> Error {
    tracing::error!(%error, "product repository failure");
    Error::internal("product store unavailable")
}

fn map_denied(denied: TransitionDenied) -> Error {
    Error::unauthorized(denied.to_string())
}

impl<E, P> ExchangeCommandService<E, P>
where
    E: ExchangeRepository,
    P: ProductRepository,
{
    /// Product ids arrive as `Int!`; a non-positive one names no product.
    async fn load_product(&self, raw: i32, role: &str) -> Result<ProductSnapshot, Error> {
        let id = ProductId::new(raw)
            .map_err(|_| Error::not_found(format!("{role} product {raw} not found")))?;
        self.product_repo
            .find_by_id(id)
            .await
            .map_err(map_product_error)?
            .ok_or_else(|| Error::not_found(format!("{role} product {id} not found")))
    }

    async fn transition(
        &self,
        actor: &UserId,
        raw_id: &str,
        status: ExchangeStatus,
    ) -> Result<Exchange, Error> {
        let id = ExchangeId::parse(raw_id).map_err(invalid_id)?;
        let current = self
            .exchange_repo
            .find_for_transition(id)
            .await
            .map_err(map_exchange_error)?
            .ok_or_else(|| Error::not_found(format!("exchange {id} not found")))?;

        let update = plan_status_update(actor, &current.parties, status, self.clock.utc())
            .map_err(|denied| {
                warn!(exchange_id = %id, actor = %actor, %status, "status change denied");
                map_denied(denied)
            })?;

        let updated = self
            .exchange_repo
            .update_status(id, update)
            .await
            .map_err(map_exchange_error)?
            .ok_or_else(|| Error::not_found(format!("exchange {id} not found")))?;
        info!(
            exchange_id = %id,
            from = %current.exchange.status,
            to = %updated.status,
            "exchange status changed"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<E, P> ExchangeCommand for ExchangeCommandService<E, P>
where
    E: ExchangeRepository,
    P: ProductRepository,
{
    async fn create_exchange(
        &self,
        actor: &UserId,
        request: CreateExchangeRequest,
    ) -> Result<Exchange, Error> {
        let offered = self
            .load_product(request.offered_product_id, "offered")
            .await?;
        if !offered.is_owned_by(actor) {
            return Err(Error::unauthorized(format!(
                "offered product {} does not belong to the requester",
                offered.id
            )));
        }

        let requested = self
            .load_product(request.requested_product_id, "requested")
            .await?;
        if !requested.is_exchangeable {
            return Err(Error::bad_request(format!(
                "requested product {} is not available for exchange",
                requested.id
            )));
        }
        if requested.is_owned_by(actor) {
            return Err(Error::bad_request("cannot exchange with your own product"));
        }

        let new_exchange = NewExchange {
            initiator: actor.clone(),
            offered_product_id: offered.id,
            requested_product_id: requested.id,
            notes: request.notes,
            points_collected: EXCHANGE_REWARD_POINTS,
        };
        let exchange = self
            .exchange_repo
            .create(&new_exchange)
            .await
            .map_err(map_exchange_error)?;
        info!(
            exchange_id = %exchange.id,
            transaction_id = %exchange.transaction_id,
            initiator = %actor,
            "exchange created"
        );
        Ok(exchange)
    }

    async fn update_exchange_status(
        &self,
        actor: &UserId,
        request: UpdateExchangeStatusRequest,
    ) -> Result<Exchange, Error> {
        self.transition(actor, &request.exchange_id, request.status)
            .await
    }

    async fn cancel_exchange(
        &self,
        actor: &UserId,
        exchange_id: String,
    ) -> Result<Exchange, Error> {
        self.transition(actor, &exchange_id, ExchangeStatus::Cancelled)
            .await
    }
}

#[cfg(test)]
#[path = "exchange_service_tests.rs"]
mod tests;
