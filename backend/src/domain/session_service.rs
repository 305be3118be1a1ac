//! Session lookup service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{SessionLookup, SessionRepository, SessionRepositoryError};
use crate::domain::{Error, SessionToken, UserId};

/// Resolves bearer tokens against the session store.
#[derive(Clone)]
pub struct SessionLookupService<R> {
    session_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SessionLookupService<R> {
    /// Create a service reading sessions from `session_repo`.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use transactions_subgraph::domain::SessionLookupService;
    /// # use transactions_subgraph::outbound::persistence::DieselSessionRepository;
    /// # fn build(repo: DieselSessionRepository) {
    /// let service = SessionLookupService::new(Arc::new(repo), Arc::new(DefaultClock));
    /// # let _ = service;
    /// # }
    /// ```
    pub fn new(session_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            clock,
        }
    }
}

fn map_session_error(error: SessionRepositoryError) -> Error {
    error!(%error, "session lookup failed");
    Error::internal("session store unavailable")
}

#[async_trait]
impl<R> SessionLookup for SessionLookupService<R>
where
    R: SessionRepository,
{
    async fn authenticate(&self, token: &SessionToken) -> Result<UserId, Error> {
        let Some(session) = self
            .session_repo
            .find_by_token(token)
            .await
            .map_err(map_session_error)?
        else {
            debug!("unknown session token");
            return Err(Error::unauthorized("invalid session"));
        };

        if session.is_expired_at(self.clock.utc()) {
            debug!(user_id = %session.user_id, "expired session token");
            return Err(Error::unauthorized("session expired"));
        }

        Ok(session.user_id)
    }
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
