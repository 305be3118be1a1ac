//! Exchange status transitions.
//!
//! Who may set which status:
//!
//! | target status                              | allowed actor            |
//! |--------------------------------------------|--------------------------|
//! | `CANCELLED`                                | initiator                |
//! | anything else (`ACCEPTED`, `DECLINED`, ...) | requested product owner  |
//!
//! The current status is not consulted: any status may follow any other,
//! including leaving `COMPLETED`. Moving to `COMPLETED` stamps the completion
//! instant; no other transition touches it.

use chrono::{DateTime, Utc};

use super::{ExchangeParties, ExchangeStatus, UserId};

/// Reasons a status change is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionDenied {
    /// Only the requested product's owner may set this status.
    #[error("only the requested product's owner may set the exchange to {status}")]
    NotRequestedOwner {
        /// Status the actor asked for.
        status: ExchangeStatus,
    },
    /// Only the initiator may cancel.
    #[error("only the exchange initiator may cancel it")]
    NotInitiator,
}

/// Write to apply once a transition is authorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// New status.
    pub status: ExchangeStatus,
    /// Completion instant to store; `None` leaves the column untouched.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Decide whether `actor` may move an exchange to `target`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use transactions_subgraph::domain::{
///     ExchangeParties, ExchangeStatus, UserId, plan_status_update,
/// };
///
/// let parties = ExchangeParties {
///     initiator: UserId::new("alice").unwrap(),
///     requested_owner: UserId::new("bob").unwrap(),
/// };
/// let bob = UserId::new("bob").unwrap();
/// let update = plan_status_update(&bob, &parties, ExchangeStatus::Accepted, Utc::now())
///     .expect("owner may accept");
/// assert!(update.completed_at.is_none());
/// ```
pub fn plan_status_update(
    actor: &UserId,
    parties: &ExchangeParties,
    target: ExchangeStatus,
    now: DateTime<Utc>,
) -> Result<StatusUpdate, TransitionDenied> {
    match target {
        ExchangeStatus::Cancelled if actor != &parties.initiator => {
            Err(TransitionDenied::NotInitiator)
        }
        ExchangeStatus::Cancelled => Ok(StatusUpdate {
            status: target,
            completed_at: None,
        }),
        _ if actor != &parties.requested_owner => {
            Err(TransitionDenied::NotRequestedOwner { status: target })
        }
        ExchangeStatus::Completed => Ok(StatusUpdate {
            status: target,
            completed_at: Some(now),
        }),
        _ => Ok(StatusUpdate {
            status: target,
            completed_at: None,
        }),
    }
}
