//! Integer primary keys for locally stored records and product references.
//!
//! GraphQL hands ids over as strings (`ID`) or `Int`s. Both go through
//! [`parse_record_id`] so a missing, non-numeric or non-positive id is always
//! reported the same way.

use std::fmt;

/// Validation errors for integer record identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdValidationError {
    /// No value was supplied.
    #[error("{field} is required")]
    Missing {
        /// Name of the offending argument.
        field: &'static str,
    },
    /// The value did not parse as an integer.
    #[error("{field} must be an integer, got {value:?}")]
    NotAnInteger {
        /// Name of the offending argument.
        field: &'static str,
        /// Raw value as received.
        value: String,
    },
    /// The value was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending argument.
        field: &'static str,
        /// Parsed value.
        value: i64,
    },
}

/// Parse a raw identifier argument into a positive `i32`.
///
/// # Examples
/// ```
/// use transactions_subgraph::domain::parse_record_id;
///
/// assert_eq!(parse_record_id("id", "17"), Ok(17));
/// assert!(parse_record_id("id", "abc").is_err());
/// assert!(parse_record_id("id", "0").is_err());
/// ```
pub fn parse_record_id(field: &'static str, raw: &str) -> Result<i32, RecordIdValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordIdValidationError::Missing { field });
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| RecordIdValidationError::NotAnInteger {
            field,
            value: raw.to_owned(),
        })?;
    if value <= 0 {
        return Err(RecordIdValidationError::NotPositive { field, value });
    }
    i32::try_from(value).map_err(|_| RecordIdValidationError::NotAnInteger {
        field,
        value: raw.to_owned(),
    })
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a positive integer key.
            pub fn new(value: i32) -> Result<Self, RecordIdValidationError> {
                if value <= 0 {
                    return Err(RecordIdValidationError::NotPositive {
                        field: $field,
                        value: i64::from(value),
                    });
                }
                Ok(Self(value))
            }

            /// Parse a GraphQL `ID` string.
            pub fn parse(raw: &str) -> Result<Self, RecordIdValidationError> {
                parse_record_id($field, raw).map(Self)
            }

            /// Wrap a key read back from storage without re-validating it.
            pub(crate) fn from_row(value: i32) -> Self {
                Self(value)
            }

            /// Raw integer value.
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_record_id!(
    /// Primary key of a ledger transaction.
    TransactionId,
    "transactionId"
);
define_record_id!(
    /// Primary key of an exchange offer.
    ExchangeId,
    "exchangeId"
);
define_record_id!(
    /// Primary key of a product owned by the products subgraph.
    ProductId,
    "productId"
);
