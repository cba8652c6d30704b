//! # Resolution Errors

use std::path::PathBuf;
use std::time::Duration;

use shared_types::{Classify, ErrorKind, NodeIdError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Key or certificate file does not exist.
    #[error("staking credential not found: {}", .0.display())]
    KeyMaterialMissing(PathBuf),

    /// The node binary could not be started.
    #[error("failed to launch {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output ended without an identity line.
    #[error("node exited without reporting a node identity")]
    NoIdentity,

    /// The identity line did not hold a valid identity.
    #[error("node reported malformed identity {text}: {source}")]
    Malformed {
        text: String,
        #[source]
        source: NodeIdError,
    },

    /// No identity before the deadline.
    #[error("no node identity within {0:?}")]
    Timeout(Duration),

    /// Reading the child's output failed.
    #[error("reading node output: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for ResolveError {
    fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::KeyMaterialMissing(_) => ErrorKind::MissingInput,
            _ => ErrorKind::ResolutionFailure,
        }
    }
}
