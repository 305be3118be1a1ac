//! PostgreSQL-backed `ExchangeRepository`.
//!
//! Creation inserts the ledger entry and the offer inside one Diesel
//! transaction; a failure on either insert rolls both back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{ExchangeRepository, ExchangeRepositoryError};
use crate::domain::{
    Exchange, ExchangeForTransition, ExchangeId, ExchangeParties, ExchangeStatus, NewExchange,
    StatusUpdate, TransactionKind, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_decode_error,
};
use super::models::{
    ExchangeRow, ExchangeStatusChange, NewExchangeRow, NewTransactionRow, RowDecodeError,
};
use super::pool::{DbPool, PoolError};
use super::schema::{exchanges, products, transactions};

/// Diesel adapter over `exchanges`.
#[derive(Clone)]
pub struct DieselExchangeRepository {
    pool: DbPool,
}

impl DieselExchangeRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExchangeRepositoryError {
    map_basic_pool_error(error, ExchangeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExchangeRepositoryError {
    map_basic_diesel_error(
        error,
        ExchangeRepositoryError::query,
        ExchangeRepositoryError::connection,
    )
}

fn map_decode_error(error: RowDecodeError) -> ExchangeRepositoryError {
    map_row_decode_error(error, ExchangeRepositoryError::query)
}

fn decode_user(raw: String) -> Result<UserId, ExchangeRepositoryError> {
    UserId::new(raw).map_err(|err| ExchangeRepositoryError::query(format!("invalid owner: {err}")))
}

#[async_trait]
impl ExchangeRepository for DieselExchangeRepository {
    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Exchange>, ExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.as_ref();

        let rows: Vec<ExchangeRow> = exchanges::table
            .filter(
                exchanges::offered_product_id
                    .eq_any(
                        products::table
                            .filter(products::user_id.eq(owner))
                            .select(products::id),
                    )
                    .or(exchanges::requested_product_id.eq_any(
                        products::table
                            .filter(products::user_id.eq(owner))
                            .select(products::id),
                    )),
            )
            .order((exchanges::created_at.desc(), exchanges::id.desc()))
            .select(ExchangeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| Exchange::try_from(row).map_err(map_decode_error))
            .collect()
    }

    async fn find_by_id(&self, id: ExchangeId) -> Result<Option<Exchange>, ExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = exchanges::table
            .find(id.get())
            .select(ExchangeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Exchange::try_from).transpose().map_err(map_decode_error)
    }

    async fn find_for_transition(
        &self,
        id: ExchangeId,
    ) -> Result<Option<ExchangeForTransition>, ExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some((row, initiator)) = exchanges::table
            .inner_join(transactions::table)
            .filter(exchanges::id.eq(id.get()))
            .select((ExchangeRow::as_select(), transactions::user_id))
            .first::<(ExchangeRow, String)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let requested_owner: String = products::table
            .find(row.requested_product_id)
            .select(products::user_id)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(ExchangeForTransition {
            exchange: Exchange::try_from(row).map_err(map_decode_error)?,
            parties: ExchangeParties {
                initiator: decode_user(initiator)?,
                requested_owner: decode_user(requested_owner)?,
            },
        }))
    }

    async fn create(&self, exchange: &NewExchange) -> Result<Exchange, ExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ledger_row = NewTransactionRow {
            kind: TransactionKind::Exchange.as_str(),
            points_collected: exchange.points_collected,
            user_id: exchange.initiator.as_ref(),
        };
        let offered_product_id = exchange.offered_product_id.get();
        let requested_product_id = exchange.requested_product_id.get();
        let notes = exchange.notes.as_deref();

        let row = conn
            .transaction::<ExchangeRow, diesel::result::Error, _>(|conn| {
                async move {
                    let transaction_id: i32 = diesel::insert_into(transactions::table)
                        .values(&ledger_row)
                        .returning(transactions::id)
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(exchanges::table)
                        .values(&NewExchangeRow {
                            transaction_id,
                            offered_product_id,
                            requested_product_id,
                            status: ExchangeStatus::Pending.as_str(),
                            notes,
                        })
                        .returning(ExchangeRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Exchange::try_from(row).map_err(map_decode_error)
    }

    async fn update_status(
        &self,
        id: ExchangeId,
        update: StatusUpdate,
    ) -> Result<Option<Exchange>, ExchangeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(exchanges::table.find(id.get()))
            .set(&ExchangeStatusChange {
                status: update.status.as_str(),
                completed_at: update.completed_at,
            })
            .returning(ExchangeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Exchange::try_from).transpose().map_err(map_decode_error)
    }
}
