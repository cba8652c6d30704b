//! # CB58 Encoding
//!
//! Base58 with a 4-byte checksum suffix: the last four bytes of
//! SHA-256 over the payload. Node identities are rendered in this form.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Length of the checksum suffix in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// CB58 decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Input contains characters outside the base58 alphabet.
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    /// Decoded input is shorter than the checksum itself.
    #[error("input too short for checksum: {0} bytes")]
    TooShort(usize),

    /// Checksum suffix does not match the payload.
    #[error("checksum mismatch")]
    ChecksumMismatch,
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

/// Encode `payload` as CB58.
pub fn cb58_encode(payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum(payload));
    bs58::encode(buf).into_string()
}

/// Decode a CB58 string, verifying and stripping the checksum.
pub fn cb58_decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    let raw = bs58::decode(input)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))?;

    if raw.len() < CHECKSUM_LEN {
        return Err(EncodingError::TooShort(raw.len()));
    }

    let (payload, suffix) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload) != suffix {
        return Err(EncodingError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
