//! Driving port that turns a bearer token into an authenticated user.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, UserId};

/// Domain use-case port for authenticating a caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionLookup: Send + Sync {
    /// Resolve `token` to the user it was issued for.
    ///
    /// Unknown and expired tokens both fail with `Unauthorized`.
    async fn authenticate(&self, token: &SessionToken) -> Result<UserId, Error>;
}
