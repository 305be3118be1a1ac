//! HTTP inbound adapter: the GraphQL endpoint, the banner and health checks.

pub mod graphql;
pub mod health;

pub use graphql::{bearer_token, json_config};
pub use health::HealthState;
