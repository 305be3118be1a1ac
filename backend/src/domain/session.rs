//! Bearer-token sessions.
//!
//! Sessions are issued by the accounts subgraph and stored in a shared table.
//! This service only reads them to turn a bearer token into a [`UserId`].

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::UserId;

/// Validation errors for [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenValidationError {
    /// Token was empty or only whitespace.
    #[error("session token must not be empty")]
    Empty,
}

/// Bearer token presented by a caller.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed.
/// - The backing buffer is zeroed on drop.
///
/// # Examples
/// ```
/// use transactions_subgraph::domain::SessionToken;
///
/// let token = SessionToken::new(" abc123 ").expect("valid token");
/// assert_eq!(token.as_str(), "abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Validate and construct a token.
    pub fn new(raw: &str) -> Result<Self, SessionTokenValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionTokenValidationError::Empty);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Token text for the storage lookup.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Stored session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Authenticated user.
    pub user_id: UserId,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is expired once `expires_at` lies strictly in the past.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
