//! Query root.

use juniper::{ID, graphql_object};

use crate::domain::DomainResult;
use crate::domain::ports::{GetByIdRequest, ListByUserRequest};

use super::GraphQLContext;
use super::federation::{EntityRepresentation, FederatedEntity, ServiceDefinition};
use super::types::{ExchangeNode, TransactionNode};

/// Root query type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query;

#[graphql_object(context = GraphQLContext)]
impl Query {
    /// Transactions owned by `userId`, newest first.
    async fn transactions(
        context: &GraphQLContext,
        user_id: Option<String>,
    ) -> DomainResult<Vec<TransactionNode>> {
        let records = context
            .transactions()
            .list_transactions(ListByUserRequest { user_id })
            .await?;
        Ok(records.into_iter().map(TransactionNode).collect())
    }

    /// One transaction by id.
    async fn transaction(context: &GraphQLContext, id: ID) -> DomainResult<Option<TransactionNode>> {
        let record = context
            .transactions()
            .get_transaction(GetByIdRequest::for_id(id.to_string()))
            .await?;
        Ok(Some(TransactionNode(record)))
    }

    /// Exchanges where `userId` owns either product, newest first.
    async fn exchanges(
        context: &GraphQLContext,
        user_id: Option<String>,
    ) -> DomainResult<Vec<ExchangeNode>> {
        let exchanges = context
            .transactions()
            .list_exchanges(ListByUserRequest { user_id })
            .await?;
        Ok(exchanges.into_iter().map(ExchangeNode).collect())
    }

    /// One exchange by id.
    async fn exchange(context: &GraphQLContext, id: ID) -> DomainResult<Option<ExchangeNode>> {
        let exchange = context
            .transactions()
            .get_exchange(GetByIdRequest::for_id(id.to_string()))
            .await?;
        Ok(Some(ExchangeNode(exchange)))
    }

    /// Transactions of the authenticated caller.
    async fn my_transactions(context: &GraphQLContext) -> DomainResult<Vec<TransactionNode>> {
        let user = context.require_user().await?;
        let records = context
            .transactions()
            .list_transactions(ListByUserRequest::for_user(user))
            .await?;
        Ok(records.into_iter().map(TransactionNode).collect())
    }

    /// Exchanges of the authenticated caller.
    async fn my_exchanges(context: &GraphQLContext) -> DomainResult<Vec<ExchangeNode>> {
        let user = context.require_user().await?;
        let exchanges = context
            .transactions()
            .list_exchanges(ListByUserRequest::for_user(user))
            .await?;
        Ok(exchanges.into_iter().map(ExchangeNode).collect())
    }

    #[graphql(name = "_service")]
    fn service() -> ServiceDefinition {
        ServiceDefinition
    }

    /// Resolve `User` and `Product` references for the gateway.
    #[graphql(name = "_entities")]
    fn entities(
        representations: Vec<EntityRepresentation>,
    ) -> DomainResult<Vec<Option<FederatedEntity>>> {
        representations
            .into_iter()
            .map(|representation| representation.resolve().map(Some))
            .collect()
    }
}
