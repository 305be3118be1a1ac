//! PostgreSQL-backed `SessionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{Session, SessionToken};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_row_decode_error,
};
use super::models::SessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel adapter reading the shared `sessions` table.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    map_basic_pool_error(error, SessionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    map_basic_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = sessions::table
            .filter(sessions::token.eq(token.as_str()))
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Session::try_from)
            .transpose()
            .map_err(|err| map_row_decode_error(err, SessionRepositoryError::query))
    }
}
