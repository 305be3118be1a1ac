//! Transactions subgraph library.
//!
//! The crate is laid out hexagonally:
//! - [`domain`]: entities, the exchange lifecycle and the services behind
//!   the driving ports.
//! - [`inbound`]: the GraphQL schema and the Actix handlers serving it.
//! - [`outbound`]: Diesel repositories for PostgreSQL.
//! - [`middleware`]: request tracing.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use domain::TraceId;
pub use middleware::Trace;
