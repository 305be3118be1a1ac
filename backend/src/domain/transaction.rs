//! Ledger transactions.
//!
//! A transaction records one points-earning activity for a user. Rows are
//! written once and never updated or deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Exchange, TransactionId, UserId};

/// Points awarded for proposing an exchange.
pub const EXCHANGE_REWARD_POINTS: i32 = 50;

/// Activity that earned the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Points from a purchase.
    Purchase,
    /// Points from proposing a product exchange.
    Exchange,
    /// Points received as a gift.
    Gift,
    /// Points from referring another user.
    Referral,
    /// Promotional bonus points.
    Bonus,
}

impl TransactionKind {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::Exchange => "EXCHANGE",
            Self::Gift => "GIFT",
            Self::Referral => "REFERRAL",
            Self::Bonus => "BONUS",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored kind is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction kind: {0}")]
pub struct UnknownTransactionKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownTransactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE" => Ok(Self::Purchase),
            "EXCHANGE" => Ok(Self::Exchange),
            "GIFT" => Ok(Self::Gift),
            "REFERRAL" => Ok(Self::Referral),
            "BONUS" => Ok(Self::Bonus),
            other => Err(UnknownTransactionKind(other.to_owned())),
        }
    }
}

/// Immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Primary key.
    pub id: TransactionId,
    /// Activity that earned the points.
    pub kind: TransactionKind,
    /// Points awarded.
    pub points_collected: i32,
    /// User the points belong to.
    pub user_id: UserId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A transaction together with the exchange it records, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// The ledger entry.
    pub transaction: Transaction,
    /// Linked exchange for `EXCHANGE` transactions.
    pub exchange: Option<Exchange>,
}
