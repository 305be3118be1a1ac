//! Domain primitives, lifecycle rules and services.
//!
//! Purpose: define the transactions and exchanges model independently of
//! GraphQL and Diesel. Adapters reach the services through the traits in
//! [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: the four-kind failure taxonomy.
//! - `Transaction`, `Exchange` and their identifiers.
//! - `plan_status_update`: who may move an exchange, and what changes.
//! - `SessionLookupService`, `TransactionsQueryService`,
//!   `ExchangeCommandService`: driving port implementations.

pub mod entity_ref;
pub mod error;
pub mod exchange;
pub mod exchange_lifecycle;
mod exchange_service;
pub mod ports;
pub mod product;
pub mod record_id;
pub mod session;
mod session_service;
pub mod trace_id;
pub mod transaction;
mod transactions_query_service;
pub mod user;

pub use self::entity_ref::EntityRef;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exchange::{
    Exchange, ExchangeForTransition, ExchangeParties, ExchangeStatus, NewExchange,
    UnknownExchangeStatus,
};
pub use self::exchange_lifecycle::{StatusUpdate, TransitionDenied, plan_status_update};
pub use self::exchange_service::ExchangeCommandService;
pub use self::product::ProductSnapshot;
pub use self::record_id::{
    ExchangeId, ProductId, RecordIdValidationError, TransactionId, parse_record_id,
};
pub use self::session::{Session, SessionToken, SessionTokenValidationError};
pub use self::session_service::SessionLookupService;
pub use self::trace_id::TraceId;
pub use self::transaction::{
    EXCHANGE_REWARD_POINTS, Transaction, TransactionKind, TransactionRecord,
    UnknownTransactionKind,
};
pub use self::transactions_query_service::TransactionsQueryService;
pub use self::user::{UserId, UserIdValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use transactions_subgraph::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("exchange 999 not found"))
/// }
/// # assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
