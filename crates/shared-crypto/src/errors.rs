//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Field is not `0x`-prefixed hex
    #[error("Invalid hex in {field}: {value}")]
    InvalidHex {
        /// Which signer field failed
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Invalid key or proof length
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Which signer field failed
        field: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature verification failed
    #[error("Proof of possession verification failed")]
    SignatureVerificationFailed,

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),
}
