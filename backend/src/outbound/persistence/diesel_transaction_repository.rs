//! PostgreSQL-backed `TransactionRepository`.
//!
//! Transactions are read with a left join so the linked exchange, if any,
//! comes back in the same round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TransactionRepository, TransactionRepositoryError};
use crate::domain::{Exchange, Transaction, TransactionId, TransactionRecord, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_decode_error,
};
use super::models::{ExchangeRow, RowDecodeError, TransactionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{exchanges, transactions};

/// Diesel adapter over `transactions` joined with `exchanges`.
#[derive(Clone)]
pub struct DieselTransactionRepository {
    pool: DbPool,
}

impl DieselTransactionRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type JoinedRow = (TransactionRow, Option<ExchangeRow>);

fn map_pool_error(error: PoolError) -> TransactionRepositoryError {
    map_basic_pool_error(error, TransactionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TransactionRepositoryError {
    map_basic_diesel_error(
        error,
        TransactionRepositoryError::query,
        TransactionRepositoryError::connection,
    )
}

fn decode((transaction, exchange): JoinedRow) -> Result<TransactionRecord, TransactionRepositoryError> {
    let decoded = Transaction::try_from(transaction).and_then(|transaction| {
        let exchange = exchange.map(Exchange::try_from).transpose()?;
        Ok::<_, RowDecodeError>(TransactionRecord {
            transaction,
            exchange,
        })
    });
    decoded.map_err(|err| map_row_decode_error(err, TransactionRepositoryError::query))
}

#[async_trait]
impl TransactionRepository for DieselTransactionRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TransactionRecord>, TransactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JoinedRow> = transactions::table
            .left_join(exchanges::table)
            .filter(transactions::user_id.eq(user_id.as_ref()))
            .order((transactions::created_at.desc(), transactions::id.desc()))
            .select((TransactionRow::as_select(), Option::<ExchangeRow>::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(decode).collect()
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, TransactionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<JoinedRow> = transactions::table
            .left_join(exchanges::table)
            .filter(transactions::id.eq(id.get()))
            .select((TransactionRow::as_select(), Option::<ExchangeRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(decode).transpose()
    }
}
