//! Read-only view of products owned by the products subgraph.

use super::{ProductId, UserId};

/// The product attributes exchange creation depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    /// Product key.
    pub id: ProductId,
    /// Current owner.
    pub owner: UserId,
    /// Whether the owner accepts exchange offers for it.
    pub is_exchangeable: bool,
}

impl ProductSnapshot {
    /// Whether `user` owns this product.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}
