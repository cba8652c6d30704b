//! # Shared Crypto - Signer Material
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `bls` | BLS12-381 (min-pk) | Validator signer blocks in genesis |
//!
//! ## Validation Levels
//!
//! - **Shape**: hex decoding, 48-byte public key, 96-byte proof. Always
//!   enforced before a signer block reaches a genesis document.
//! - **Possession**: the proof is a valid signature by the key over its own
//!   compressed bytes. Opt-in; the consuming node re-checks it anyway.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod errors;

// Re-exports
pub use bls::{BlsSigner, BLS_PROOF_LEN, BLS_PUBLIC_KEY_LEN};
#[cfg(any(test, feature = "test-utils"))]
pub use bls::BlsKeyPair;
pub use errors::CryptoError;
