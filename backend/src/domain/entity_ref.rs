//! References to federated entities owned by other subgraphs.
//!
//! `User` and `Product` are resolved by their own subgraphs. Here they are
//! nothing more than an id the gateway uses to stitch the full entity in.

use std::fmt;

/// Identity-only handle on an entity owned elsewhere in the supergraph.
///
/// # Examples
/// ```
/// use transactions_subgraph::domain::EntityRef;
///
/// let product = EntityRef::new(7);
/// assert_eq!(product.id(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    id: String,
}

impl EntityRef {
    /// Reference the entity with the given key.
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }

    /// Entity key as rendered in the federation representation.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
