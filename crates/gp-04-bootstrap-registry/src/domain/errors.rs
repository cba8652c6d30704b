//! # Registry Errors

use std::path::PathBuf;

use shared_types::{Classify, ErrorKind, NodeId, SlotIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no eligible stakers for the bootstrap registry")]
    NoEligibleStakers,

    #[error("slot {slot} has no resolved node identity")]
    Unresolved { slot: SlotIndex },

    #[error("slot {slot} has malformed node identity: {reason}")]
    MalformedIdentity { slot: SlotIndex, reason: String },

    #[error("node identity {id} appears in slot {first} and slot {second}")]
    DuplicateIdentity {
        id: NodeId,
        first: SlotIndex,
        second: SlotIndex,
    },

    #[error("invalid registry configuration: {0}")]
    InvalidConfig(String),

    /// The existing registry file is not a JSON object.
    #[error("malformed bootstrap registry {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to encode bootstrap registry: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Classify for RegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NoEligibleStakers => ErrorKind::MissingInput,
            RegistryError::Io { .. } => ErrorKind::Io,
            _ => ErrorKind::InvariantViolation,
        }
    }
}
