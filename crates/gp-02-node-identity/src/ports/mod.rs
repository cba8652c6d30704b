//! # Ports Layer

use async_trait::async_trait;
use gp_01_staker_store::KeyMaterial;
use shared_types::NodeId;

use crate::domain::errors::ResolveError;

/// Derives a node identity from TLS staking credentials.
///
/// Deterministic: the same key/cert pair always yields the same identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, key: &KeyMaterial) -> Result<NodeId, ResolveError>;
}

#[async_trait]
impl<T: IdentityResolver + ?Sized> IdentityResolver for &T {
    async fn resolve(&self, key: &KeyMaterial) -> Result<NodeId, ResolveError> {
        (**self).resolve(key).await
    }
}
