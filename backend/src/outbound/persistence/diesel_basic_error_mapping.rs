//! Shared mapping from pool and Diesel failures to port errors.
//!
//! Causes are logged at `debug` and replaced with short fixed messages so no
//! SQL or connection detail reaches the domain.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::RowDecodeError;
use super::pool::PoolError;

/// Map a pool failure through the port's `connection` constructor.
pub(crate) fn map_basic_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    debug!(%error, "connection pool failure");
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map a Diesel failure through the port's `query` or `connection`
/// constructor.
pub(crate) fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::RollbackTransaction | DieselError::RollbackErrorOnCommit { .. } => {
            query("database transaction rolled back")
        }
        _ => query("database error"),
    }
}

/// Map a row that failed to decode through the port's `query` constructor.
pub(crate) fn map_row_decode_error<E>(error: RowDecodeError, query: impl FnOnce(String) -> E) -> E {
    debug!(%error, "stored row failed to decode");
    query(error.to_string())
}
