//! Inbound adapters translating external requests into driving-port calls.
//!
//! [`graphql`] holds the schema and resolvers; [`http`] mounts them on
//! actix-web next to the operational endpoints.

pub mod graphql;
pub mod http;
