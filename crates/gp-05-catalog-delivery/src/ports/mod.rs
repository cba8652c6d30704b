//! # Ports Layer

use async_trait::async_trait;

use crate::domain::change_set::{ChangeSetReceipt, ChangeSetRequest};
use crate::domain::errors::CatalogError;

/// External catalog service (driven port).
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Submit a change set.
    ///
    /// Must return `CatalogError::ResourceInUse` when the product is locked
    /// by another pending change.
    async fn start_change_set(
        &self,
        request: &ChangeSetRequest,
    ) -> Result<ChangeSetReceipt, CatalogError>;
}
