//! Port for reading products owned by the products subgraph.

use async_trait::async_trait;

use crate::domain::{ProductId, ProductSnapshot};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "product repository query failed: {message}",
    }
}

/// Read-only access to product ownership and exchangeability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by id.
    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductSnapshot>, ProductRepositoryError>;
}
