//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between row structs and domain
//! types and map failures to port errors. Row structs (`models`) and table
//! definitions (`schema`) stay private to this module.
//!
//! ```no_run
//! use transactions_subgraph::outbound::persistence::{
//!     DbPool, DieselExchangeRepository, PoolConfig,
//! };
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/market")).await?;
//! let exchanges = DieselExchangeRepository::new(pool);
//! # let _ = exchanges;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_exchange_repository;
mod diesel_product_repository;
mod diesel_session_repository;
mod diesel_transaction_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exchange_repository::DieselExchangeRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_transaction_repository::DieselTransactionRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
