//! Port for reading bearer-token sessions.

use async_trait::async_trait;

use crate::domain::{Session, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "session repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "session repository query failed: {message}",
    }
}

/// Port for looking up sessions by token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find the session issued for `token`, expired or not.
    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, SessionRepositoryError>;
}
