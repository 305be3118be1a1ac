//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports are implemented by domain services and called by the
//! GraphQL adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod exchange_command;
mod exchange_repository;
mod product_repository;
mod session_lookup;
mod session_repository;
mod transaction_repository;
mod transactions_query;

pub use exchange_command::{CreateExchangeRequest, ExchangeCommand, UpdateExchangeStatusRequest};
#[cfg(test)]
pub use exchange_command::MockExchangeCommand;
pub use exchange_repository::{ExchangeRepository, ExchangeRepositoryError};
#[cfg(test)]
pub use exchange_repository::MockExchangeRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use session_lookup::MockSessionLookup;
pub use session_lookup::SessionLookup;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use transaction_repository::MockTransactionRepository;
pub use transaction_repository::{TransactionRepository, TransactionRepositoryError};
#[cfg(test)]
pub use transactions_query::MockTransactionsQuery;
pub use transactions_query::{GetByIdRequest, ListByUserRequest, TransactionsQuery};
