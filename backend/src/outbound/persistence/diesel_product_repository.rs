//! PostgreSQL-backed `ProductRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{ProductId, ProductSnapshot};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_decode_error,
};
use super::models::ProductRow;
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel adapter reading ownership and exchangeability from `products`.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    map_basic_pool_error(error, ProductRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    map_basic_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductSnapshot>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(ProductSnapshot::try_from)
            .transpose()
            .map_err(|err| map_row_decode_error(err, ProductRepositoryError::query))
    }
}
