//! # Store Errors

use std::path::PathBuf;

use shared_types::{Classify, ErrorKind, NodeId, SlotIndex};
use thiserror::Error;

/// Errors from the staker record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record file for the slot.
    #[error("no staker record for slot {slot} at {}", path.display())]
    NotFound { slot: SlotIndex, path: PathBuf },

    /// Key or certificate file absent.
    #[error("key material for slot {slot} missing: {}", path.display())]
    KeyMaterialMissing { slot: SlotIndex, path: PathBuf },

    /// The record file does not decode.
    #[error("malformed staker record {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Patch would replace a resolved identity.
    #[error("slot already resolved to {existing}, refusing {proposed} without reprovision")]
    IdentityConflict { existing: String, proposed: NodeId },

    /// Staking directory is held by another process.
    #[error("staking directory locked by another process (pid {pid:?}, {})", path.display())]
    Locked { pid: Option<u32>, path: PathBuf },

    /// Writes need the directory lock.
    #[error("store opened read-only")]
    ReadOnly,

    /// Staking directory does not exist.
    #[error("staking directory {} does not exist", .0.display())]
    DirectoryMissing(PathBuf),

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl Classify for StoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. }
            | StoreError::KeyMaterialMissing { .. }
            | StoreError::DirectoryMissing(_) => ErrorKind::MissingInput,
            StoreError::Malformed { .. } | StoreError::IdentityConflict { .. } => {
                ErrorKind::InvariantViolation
            }
            StoreError::Locked { .. } | StoreError::ReadOnly | StoreError::Io { .. } => {
                ErrorKind::Io
            }
        }
    }
}
