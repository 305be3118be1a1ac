//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer. Conversions into domain types
//! live here so every repository decodes enums and ids the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Exchange, ExchangeId, ExchangeStatus, ProductId, ProductSnapshot, Session, Transaction,
    TransactionId, TransactionKind, UserId,
};

use super::schema::{exchanges, products, sessions, transactions};

/// Reasons a stored row cannot be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowDecodeError {
    #[error("unknown transaction kind {0:?}")]
    Kind(String),
    #[error("unknown exchange status {0:?}")]
    Status(String),
    #[error("invalid user id in {table}: {message}")]
    User { table: &'static str, message: String },
}

fn decode_user(table: &'static str, raw: String) -> Result<UserId, RowDecodeError> {
    UserId::new(raw).map_err(|err| RowDecodeError::User {
        table,
        message: err.to_string(),
    })
}

/// Row read from `transactions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: i32,
    pub kind: String,
    pub points_collected: i32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = RowDecodeError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<TransactionKind>()
            .map_err(|err| RowDecodeError::Kind(err.0))?;
        Ok(Self {
            id: TransactionId::from_row(row.id),
            kind,
            points_collected: row.points_collected,
            user_id: decode_user("transactions", row.user_id)?,
            created_at: row.created_at,
        })
    }
}

/// Insertable ledger entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub(crate) struct NewTransactionRow<'a> {
    pub kind: &'a str,
    pub points_collected: i32,
    pub user_id: &'a str,
}

/// Row read from `exchanges`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exchanges)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExchangeRow {
    pub id: i32,
    pub transaction_id: i32,
    pub offered_product_id: i32,
    pub requested_product_id: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ExchangeRow> for Exchange {
    type Error = RowDecodeError;

    fn try_from(row: ExchangeRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ExchangeStatus>()
            .map_err(|err| RowDecodeError::Status(err.0))?;
        Ok(Self {
            id: ExchangeId::from_row(row.id),
            transaction_id: TransactionId::from_row(row.transaction_id),
            offered_product_id: ProductId::from_row(row.offered_product_id),
            requested_product_id: ProductId::from_row(row.requested_product_id),
            status,
            notes: row.notes,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

/// Insertable exchange offer.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exchanges)]
pub(crate) struct NewExchangeRow<'a> {
    pub transaction_id: i32,
    pub offered_product_id: i32,
    pub requested_product_id: i32,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

/// Status change. `completed_at` is skipped when `None` so the column keeps
/// its stored value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = exchanges)]
pub(crate) struct ExchangeStatusChange<'a> {
    pub status: &'a str,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Row read from `products`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub user_id: String,
    pub is_exchangeable: bool,
}

impl TryFrom<ProductRow> for ProductSnapshot {
    type Error = RowDecodeError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::from_row(row.id),
            owner: decode_user("products", row.user_id)?,
            is_exchangeable: row.is_exchangeable,
        })
    }
}

/// Row read from `sessions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for Session {
    type Error = RowDecodeError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: decode_user("sessions", row.user_id)?,
            expires_at: row.expires_at,
        })
    }
}
