//! User identity as seen by this subgraph.
//!
//! Users are owned by the accounts subgraph. Locally we only ever hold their
//! identifier, which is an opaque string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// Identifier was empty or only whitespace.
    #[error("user id must not be empty")]
    Empty,
    /// Identifier carried leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Opaque identifier of a user owned by another subgraph.
///
/// # Examples
/// ```
/// use transactions_subgraph::domain::UserId;
///
/// let id = UserId::new("user-42").expect("valid id");
/// assert_eq!(id.as_ref(), "user-42");
/// assert!(UserId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdValidationError::Empty)]
    #[case("   ", UserIdValidationError::Empty)]
    #[case(" user-1", UserIdValidationError::SurroundingWhitespace)]
    #[case("user-1\n", UserIdValidationError::SurroundingWhitespace)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn deserialises_through_validation() {
        let parsed: Result<UserId, _> = serde_json::from_str("\" padded \"");
        assert!(parsed.is_err());

        let ok: UserId = serde_json::from_str("\"clx0a1b2c\"").expect("valid id");
        assert_eq!(ok.to_string(), "clx0a1b2c");
    }
}
