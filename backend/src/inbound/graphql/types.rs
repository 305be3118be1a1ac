//! GraphQL object, enum and input types.
//!
//! Domain types stay free of juniper; the wrappers here render them.

use chrono::{DateTime, SecondsFormat, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject, ID, graphql_object};

use crate::domain::ports::{CreateExchangeRequest, UpdateExchangeStatusRequest};
use crate::domain::{EntityRef, Exchange, ExchangeStatus, TransactionKind, TransactionRecord};

use super::GraphQLContext;

fn render_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
#[graphql(name = "TransactionKind")]
pub enum TransactionKindValue {
    /// Points from a purchase.
    Purchase,
    /// Points for proposing an exchange.
    Exchange,
    /// Points received as a gift.
    Gift,
    /// Points for referring a user.
    Referral,
    /// Promotional points.
    Bonus,
}

impl From<TransactionKind> for TransactionKindValue {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Purchase => Self::Purchase,
            TransactionKind::Exchange => Self::Exchange,
            TransactionKind::Gift => Self::Gift,
            TransactionKind::Referral => Self::Referral,
            TransactionKind::Bonus => Self::Bonus,
        }
    }
}

/// Exchange lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
#[graphql(name = "ExchangeStatus")]
pub enum ExchangeStatusValue {
    /// Waiting for the requested product's owner.
    Pending,
    /// Accepted by the requested product's owner.
    Accepted,
    /// Declined by the requested product's owner.
    Declined,
    /// Goods have changed hands.
    Completed,
    /// Withdrawn by the initiator.
    Cancelled,
}

impl From<ExchangeStatus> for ExchangeStatusValue {
    fn from(status: ExchangeStatus) -> Self {
        match status {
            ExchangeStatus::Pending => Self::Pending,
            ExchangeStatus::Accepted => Self::Accepted,
            ExchangeStatus::Declined => Self::Declined,
            ExchangeStatus::Completed => Self::Completed,
            ExchangeStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ExchangeStatusValue> for ExchangeStatus {
    fn from(value: ExchangeStatusValue) -> Self {
        match value {
            ExchangeStatusValue::Pending => Self::Pending,
            ExchangeStatusValue::Accepted => Self::Accepted,
            ExchangeStatusValue::Declined => Self::Declined,
            ExchangeStatusValue::Completed => Self::Completed,
            ExchangeStatusValue::Cancelled => Self::Cancelled,
        }
    }
}

/// Federated `User` stub; resolved by the users subgraph.
#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject)]
#[graphql(name = "User", context = GraphQLContext)]
pub struct UserEntity {
    /// User key.
    pub id: ID,
}

impl From<EntityRef> for UserEntity {
    fn from(entity: EntityRef) -> Self {
        Self {
            id: ID::new(entity.id()),
        }
    }
}

/// Federated `Product` stub; resolved by the products subgraph.
#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject)]
#[graphql(name = "Product", context = GraphQLContext)]
pub struct ProductEntity {
    /// Product key.
    pub id: ID,
}

impl From<EntityRef> for ProductEntity {
    fn from(entity: EntityRef) -> Self {
        Self {
            id: ID::new(entity.id()),
        }
    }
}

/// GraphQL view of a ledger entry.
pub struct TransactionNode(pub TransactionRecord);

#[graphql_object(name = "Transaction", context = GraphQLContext)]
impl TransactionNode {
    fn id(&self) -> ID {
        ID::new(self.0.transaction.id.to_string())
    }

    fn kind(&self) -> TransactionKindValue {
        self.0.transaction.kind.into()
    }

    fn points_collected(&self) -> i32 {
        self.0.transaction.points_collected
    }

    fn created_at(&self) -> String {
        render_timestamp(self.0.transaction.created_at)
    }

    fn user_id(&self) -> &str {
        self.0.transaction.user_id.as_ref()
    }

    fn user(&self) -> Option<UserEntity> {
        Some(EntityRef::new(&self.0.transaction.user_id).into())
    }

    fn exchange_details(&self) -> Option<ExchangeNode> {
        self.0.exchange.clone().map(ExchangeNode)
    }
}

/// GraphQL view of an exchange offer.
pub struct ExchangeNode(pub Exchange);

#[graphql_object(name = "ExchangeDetails", context = GraphQLContext)]
impl ExchangeNode {
    fn id(&self) -> ID {
        ID::new(self.0.id.to_string())
    }

    fn transaction_id(&self) -> i32 {
        self.0.transaction_id.get()
    }

    fn offered_product_id(&self) -> i32 {
        self.0.offered_product_id.get()
    }

    fn requested_product_id(&self) -> i32 {
        self.0.requested_product_id.get()
    }

    fn offered_product(&self) -> Option<ProductEntity> {
        Some(EntityRef::new(self.0.offered_product_id).into())
    }

    fn requested_product(&self) -> Option<ProductEntity> {
        Some(EntityRef::new(self.0.requested_product_id).into())
    }

    fn status(&self) -> ExchangeStatusValue {
        self.0.status.into()
    }

    fn created_at(&self) -> String {
        render_timestamp(self.0.created_at)
    }

    fn completed_at(&self) -> Option<String> {
        self.0.completed_at.map(render_timestamp)
    }

    fn notes(&self) -> Option<&str> {
        self.0.notes.as_deref()
    }
}

/// Arguments of `createExchange`.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateExchangeInput {
    /// Product the caller offers.
    pub offered_product_id: i32,
    /// Product the caller wants.
    pub requested_product_id: i32,
    /// Optional note for the other party.
    pub notes: Option<String>,
}

impl From<CreateExchangeInput> for CreateExchangeRequest {
    fn from(input: CreateExchangeInput) -> Self {
        Self {
            offered_product_id: input.offered_product_id,
            requested_product_id: input.requested_product_id,
            notes: input.notes,
        }
    }
}

/// Arguments of `updateExchangeStatus`.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateExchangeStatusInput {
    /// Exchange to change.
    pub exchange_id: ID,
    /// Target status.
    pub status: ExchangeStatusValue,
}

impl From<UpdateExchangeStatusInput> for UpdateExchangeStatusRequest {
    fn from(input: UpdateExchangeStatusInput) -> Self {
        Self {
            exchange_id: input.exchange_id.to_string(),
            status: input.status.into(),
        }
    }
}
