//! BLS12-381 Signer Material
//!
//! Provides the signer block carried by BLS-enabled initial stakers:
//! - Shape validation of hex-encoded public key and proof of possession
//! - Optional proof-of-possession verification
//!
//! Used by gp-03-genesis-builder when folding staker records.

use blst::min_pk::{PublicKey, Signature};
use blst::BLST_ERROR;
use serde::{Deserialize, Serialize};

use crate::CryptoError;

/// Domain separation tag for proofs of possession
const DST_POP: &[u8] = b"BLS_POP_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed public key length
pub const BLS_PUBLIC_KEY_LEN: usize = 48;

/// Proof of possession (signature) length
pub const BLS_PROOF_LEN: usize = 96;

/// Signer block of an initial staker.
///
/// Serializes as `{"publicKey": "0x…", "proofOfPossession": "0x…"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SignerHex", into = "SignerHex")]
pub struct BlsSigner {
    public_key: [u8; BLS_PUBLIC_KEY_LEN],
    proof_of_possession: [u8; BLS_PROOF_LEN],
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignerHex {
    public_key: String,
    proof_of_possession: String,
}

impl TryFrom<SignerHex> for BlsSigner {
    type Error = CryptoError;

    fn try_from(value: SignerHex) -> Result<Self, Self::Error> {
        BlsSigner::from_hex(&value.public_key, &value.proof_of_possession)
    }
}

impl From<BlsSigner> for SignerHex {
    fn from(signer: BlsSigner) -> Self {
        SignerHex {
            public_key: signer.public_key_hex(),
            proof_of_possession: signer.proof_hex(),
        }
    }
}

fn decode_field<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], CryptoError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| CryptoError::InvalidHex {
            field,
            value: value.to_string(),
        })?;
    let bytes = hex::decode(digits).map_err(|_| CryptoError::InvalidHex {
        field,
        value: value.to_string(),
    })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

impl BlsSigner {
    /// Build from raw bytes
    pub fn from_bytes(
        public_key: [u8; BLS_PUBLIC_KEY_LEN],
        proof_of_possession: [u8; BLS_PROOF_LEN],
    ) -> Self {
        Self {
            public_key,
            proof_of_possession,
        }
    }

    /// Parse `0x`-prefixed hex fields, checking shape only
    pub fn from_hex(public_key: &str, proof_of_possession: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            public_key: decode_field("publicKey", public_key)?,
            proof_of_possession: decode_field("proofOfPossession", proof_of_possession)?,
        })
    }

    /// Compressed public key bytes
    pub fn public_key(&self) -> &[u8; BLS_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Proof of possession bytes
    pub fn proof_of_possession(&self) -> &[u8; BLS_PROOF_LEN] {
        &self.proof_of_possession
    }

    /// `0x`-prefixed public key
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_key))
    }

    /// `0x`-prefixed proof of possession
    pub fn proof_hex(&self) -> String {
        format!("0x{}", hex::encode(self.proof_of_possession))
    }

    /// Verify the proof is a signature by the key over its own bytes.
    ///
    /// Also rejects keys and proofs that are not valid curve points.
    pub fn verify_proof_of_possession(&self) -> Result<(), CryptoError> {
        let pk = PublicKey::key_validate(&self.public_key)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = Signature::from_bytes(&self.proof_of_possession)
            .map_err(|_| CryptoError::InvalidSignature)?;

        match sig.verify(true, &self.public_key, DST_POP, &[], &pk, true) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
mod keygen {
    use blst::min_pk::SecretKey;
    use rand::RngCore;

    use super::{BlsSigner, DST_POP};
    use crate::CryptoError;

    /// BLS key pair for producing signer fixtures
    pub struct BlsKeyPair {
        secret: SecretKey,
    }

    impl BlsKeyPair {
        /// Generate a new random key pair
        pub fn generate() -> Result<Self, CryptoError> {
            let mut ikm = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut ikm);
            Self::from_ikm(&ikm)
        }

        /// Deterministic key pair from input key material
        pub fn from_ikm(ikm: &[u8; 32]) -> Result<Self, CryptoError> {
            let secret = SecretKey::key_gen(ikm, &[])
                .map_err(|e| CryptoError::KeyGenerationFailed(format!("{:?}", e)))?;
            Ok(Self { secret })
        }

        /// Signer block with a proof of possession over the public key
        pub fn signer(&self) -> BlsSigner {
            let pk = self.secret.sk_to_pk().to_bytes();
            let pop = self.secret.sign(&pk, DST_POP, &[]).to_bytes();
            BlsSigner::from_bytes(pk, pop)
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use keygen::BlsKeyPair;
