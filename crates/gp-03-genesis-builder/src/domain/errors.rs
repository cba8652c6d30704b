//! # Genesis Errors

use std::path::PathBuf;

use shared_types::{Classify, ErrorKind, NodeId, SlotIndex};
use thiserror::Error;

/// Genesis document creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// No staker records to build from.
    #[error("no eligible stakers: at least one staker record is required")]
    NoEligibleStakers,

    /// Record has no node identity yet.
    #[error("slot {slot} has no resolved node identity")]
    Unresolved { slot: SlotIndex },

    /// Record identity does not parse.
    #[error("slot {slot} has malformed node identity: {reason}")]
    MalformedIdentity { slot: SlotIndex, reason: String },

    /// Two slots carry the same identity.
    #[error("node identity {id} appears in slot {first} and slot {second}")]
    DuplicateIdentity {
        id: NodeId,
        first: SlotIndex,
        second: SlotIndex,
    },

    /// An address field is invalid for this network.
    #[error("slot {slot}: invalid {field}: {reason}")]
    InvalidAddress {
        slot: SlotIndex,
        field: &'static str,
        reason: String,
    },

    /// BLS signer fields are half-present or malformed.
    #[error("slot {slot}: invalid BLS signer: {reason}")]
    InvalidSigner { slot: SlotIndex, reason: String },

    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// Summed allocations exceed `u64`.
    #[error("total initial supply overflows u64")]
    SupplyOverflow,

    /// Execution genesis could not be encoded.
    #[error("failed to encode execution genesis: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Writing the document failed.
    #[error("failed to write genesis to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Classify for GenesisError {
    fn kind(&self) -> ErrorKind {
        match self {
            GenesisError::NoEligibleStakers => ErrorKind::MissingInput,
            GenesisError::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::InvariantViolation,
        }
    }
}
