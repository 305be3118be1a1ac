//! Mutation root. Every field needs an authenticated caller.

use juniper::{ID, graphql_object};

use crate::domain::DomainResult;

use super::GraphQLContext;
use super::types::{CreateExchangeInput, ExchangeNode, UpdateExchangeStatusInput};

/// Root mutation type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mutation;

#[graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Offer one of the caller's products for someone else's.
    async fn create_exchange(
        context: &GraphQLContext,
        input: CreateExchangeInput,
    ) -> DomainResult<ExchangeNode> {
        let actor = context.require_user().await?;
        context
            .exchanges()
            .create_exchange(&actor, input.into())
            .await
            .map(ExchangeNode)
    }

    /// Move an exchange to a new status.
    async fn update_exchange_status(
        context: &GraphQLContext,
        input: UpdateExchangeStatusInput,
    ) -> DomainResult<ExchangeNode> {
        let actor = context.require_user().await?;
        context
            .exchanges()
            .update_exchange_status(&actor, input.into())
            .await
            .map(ExchangeNode)
    }

    /// Withdraw an exchange the caller proposed.
    async fn cancel_exchange(context: &GraphQLContext, exchange_id: ID) -> DomainResult<ExchangeNode> {
        let actor = context.require_user().await?;
        context
            .exchanges()
            .cancel_exchange(&actor, exchange_id.to_string())
            .await
            .map(ExchangeNode)
    }
}
