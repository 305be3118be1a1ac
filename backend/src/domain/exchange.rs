//! Exchange offers between two users.
//!
//! An exchange proposes swapping the requester's offered product for another
//! user's requested product. It is created together with its `EXCHANGE`
//! ledger transaction and afterwards only changes status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExchangeId, ProductId, TransactionId, UserId};

/// Lifecycle status of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    /// Waiting for the requested product's owner.
    Pending,
    /// Requested product's owner agreed.
    Accepted,
    /// Requested product's owner refused.
    Declined,
    /// Swap carried out.
    Completed,
    /// Withdrawn by the initiator.
    Cancelled,
}

impl ExchangeStatus {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored status is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exchange status: {0}")]
pub struct UnknownExchangeStatus(pub String);

impl FromStr for ExchangeStatus {
    type Err = UnknownExchangeStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "DECLINED" => Ok(Self::Declined),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(UnknownExchangeStatus(other.to_owned())),
        }
    }
}

/// Exchange offer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Primary key.
    pub id: ExchangeId,
    /// Parent `EXCHANGE` transaction.
    pub transaction_id: TransactionId,
    /// Product the initiator gives.
    pub offered_product_id: ProductId,
    /// Product the initiator wants.
    pub requested_product_id: ProductId,
    /// Current lifecycle status.
    pub status: ExchangeStatus,
    /// Free-text note from the initiator.
    pub notes: Option<String>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Set when the exchange is marked completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// The two users with a say over an exchange's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeParties {
    /// Owner of the parent transaction, i.e. who proposed the exchange.
    pub initiator: UserId,
    /// Current owner of the requested product.
    pub requested_owner: UserId,
}

/// Exchange loaded together with its parties for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeForTransition {
    /// The exchange as currently stored.
    pub exchange: Exchange,
    /// Who may change it.
    pub parties: ExchangeParties,
}

/// Values needed to insert an exchange and its ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    /// Proposing user; owns the new transaction.
    pub initiator: UserId,
    /// Product the initiator gives.
    pub offered_product_id: ProductId,
    /// Product the initiator wants.
    pub requested_product_id: ProductId,
    /// Optional note.
    pub notes: Option<String>,
    /// Points written on the `EXCHANGE` transaction.
    pub points_collected: i32,
}
