//! # Staker Records
//!
//! A record is kept close to its on-disk JSON: addresses and BLS material
//! are stored as text and validated by the document builders, so a record
//! with a bad address can still have its identity patched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_crypto::BlsSigner;
use shared_types::{ChainAddress, ExecutionAddress, NodeId, NodeIdError};

use crate::domain::errors::StoreError;

/// One validator slot's record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakerRecord {
    /// Node identity, empty until resolved.
    #[serde(default)]
    pub id: String,
    /// Native-chain allocation address (`X-lux1…`).
    #[serde(default)]
    pub chain_address: String,
    /// Execution-chain address (`0x…`).
    #[serde(default, alias = "executionAddress")]
    pub eth_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bls_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bls_proof_of_possession: Option<String>,
    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StakerRecord {
    /// Unresolved record for the given addresses.
    pub fn new(chain_address: &ChainAddress, eth_address: &ExecutionAddress) -> Self {
        Self {
            chain_address: chain_address.to_string(),
            eth_address: eth_address.to_string(),
            ..Default::default()
        }
    }

    /// Attach BLS signer material.
    pub fn with_signer(mut self, signer: &BlsSigner) -> Self {
        self.bls_public_key = Some(signer.public_key_hex());
        self.bls_proof_of_possession = Some(signer.proof_hex());
        self
    }

    /// Parsed identity; `None` while unresolved.
    pub fn node_id(&self) -> Result<Option<NodeId>, NodeIdError> {
        if self.id.is_empty() {
            return Ok(None);
        }
        self.id.parse().map(Some)
    }

    pub fn is_resolved(&self) -> bool {
        !self.id.is_empty()
    }

    /// Apply a patch in place.
    pub fn apply(&mut self, patch: &RecordPatch) -> Result<(), StoreError> {
        if let Some(id) = &patch.id {
            let proposed = id.to_string();
            if self.is_resolved() && self.id != proposed && !patch.reprovision {
                return Err(StoreError::IdentityConflict {
                    existing: self.id.clone(),
                    proposed: *id,
                });
            }
            self.id = proposed;
        }
        if let Some(addr) = &patch.chain_address {
            self.chain_address = addr.to_string();
        }
        if let Some(addr) = &patch.eth_address {
            self.eth_address = addr.to_string();
        }
        if let Some(signer) = &patch.signer {
            self.bls_public_key = Some(signer.public_key_hex());
            self.bls_proof_of_possession = Some(signer.proof_hex());
        }
        Ok(())
    }
}

/// Fields to change on an existing record.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub id: Option<NodeId>,
    pub chain_address: Option<ChainAddress>,
    pub eth_address: Option<ExecutionAddress>,
    pub signer: Option<BlsSigner>,
    /// Allow replacing an already resolved identity.
    pub reprovision: bool,
}

impl RecordPatch {
    /// Patch that sets only the identity.
    pub fn identity(id: NodeId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn reprovisioning(mut self) -> Self {
        self.reprovision = true;
        self
    }
}

/// TLS credentials of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
}

impl KeyMaterial {
    pub fn new(key_path: impl Into<PathBuf>, cert_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            cert_path: cert_path.into(),
        }
    }
}
