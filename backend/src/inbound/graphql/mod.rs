//! GraphQL inbound adapter built on juniper.
//!
//! Resolvers translate arguments into driving-port calls and wrap the
//! results in the types from [`types`]. Domain errors become field errors
//! through the policy in [`error`].

mod context;
pub mod error;
pub mod federation;
mod mutation;
mod query;
pub mod types;

use juniper::{EmptySubscription, RootNode};

pub use context::{GraphQLContext, GraphQLPorts};
pub use error::{GENERIC_ERROR_MESSAGE, mask_error_messages};
pub use federation::encode_entity_representations;
pub use mutation::Mutation;
pub use query::Query;

/// Executable schema type.
pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

/// Build the schema.
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
