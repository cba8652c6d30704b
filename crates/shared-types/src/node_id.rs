//! # Node Identity
//!
//! The canonical identifier a network assigns to a validator, derived by
//! the node software from its staking TLS certificate.
//!
//! Textual form: `NodeID-` followed by the CB58 encoding of a 20-byte
//! short id. A [`NodeId`] can only be built from text whose checksum
//! verifies, so holding one means the identity is syntactically well-formed.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use crate::encoding::{cb58_decode, cb58_encode, EncodingError};

/// Prefix of every textual node identity.
pub const NODE_ID_PREFIX: &str = "NodeID-";

/// Length of the short id carried by a node identity.
pub const SHORT_ID_LEN: usize = 20;

/// Node identity parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeIdError {
    /// Text does not start with `NodeID-`.
    #[error("node identity must start with 'NodeID-': {0}")]
    MissingPrefix(String),

    /// Body is not valid CB58.
    #[error("node identity {input} is not valid cb58: {source}")]
    Encoding {
        /// Offending input.
        input: String,
        /// Underlying decode failure.
        source: EncodingError,
    },

    /// Payload is not exactly 20 bytes.
    #[error("node identity payload must be 20 bytes, got {0}")]
    WrongLength(usize),
}

/// A validated node identity.
///
/// Serializes as its `NodeID-…` text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct NodeId([u8; SHORT_ID_LEN]);

impl NodeId {
    /// Wrap a raw 20-byte short id.
    pub fn from_short_id(bytes: [u8; SHORT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw short id bytes.
    pub fn as_bytes(&self) -> &[u8; SHORT_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NODE_ID_PREFIX, cb58_encode(&self.0))
    }
}

impl FromStr for NodeId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(NODE_ID_PREFIX)
            .ok_or_else(|| NodeIdError::MissingPrefix(s.to_string()))?;

        let payload = cb58_decode(body).map_err(|source| NodeIdError::Encoding {
            input: s.to_string(),
            source,
        })?;

        let bytes: [u8; SHORT_ID_LEN] = payload
            .as_slice()
            .try_into()
            .map_err(|_| NodeIdError::WrongLength(payload.len()))?;

        Ok(Self(bytes))
    }
}
