//! # Chain Addresses
//!
//! Two address families appear in a genesis document:
//!
//! - [`ChainAddress`]: `<chain>-<hrp>1<bech32>` on the native asset chains
//!   (e.g. `X-lux1…`, `P-lux1…`), 20-byte payload.
//! - [`ExecutionAddress`]: `0x` + 40 hex digits on the execution chain.
//!
//! The same 20-byte payload can be rendered for any chain alias, which is
//! how a reward address on the platform chain is derived from an exchange
//! chain allocation address.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Payload length shared by both address families.
pub const ADDRESS_LEN: usize = 20;

/// Address parse and format failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Missing `<chain>-` prefix.
    #[error("address {0} has no chain alias prefix")]
    MissingChainAlias(String),

    /// Chain alias contains characters other than ASCII alphanumerics.
    #[error("invalid chain alias: {0}")]
    InvalidChainAlias(String),

    /// Bech32 decoding or encoding failed.
    #[error("bech32 error for {input}: {reason}")]
    Bech32 {
        /// Offending input.
        input: String,
        /// Decoder message.
        reason: String,
    },

    /// Payload is not 20 bytes.
    #[error("address payload must be 20 bytes, got {0}")]
    WrongLength(usize),

    /// Execution address is not `0x`-prefixed hex.
    #[error("invalid execution address: {0}")]
    InvalidHex(String),
}

/// A bech32 address on one of the native chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct ChainAddress {
    chain: String,
    hrp: String,
    payload: [u8; ADDRESS_LEN],
    rendered: String,
}

impl ChainAddress {
    /// Build an address from its parts.
    pub fn new(chain: &str, hrp: &str, payload: [u8; ADDRESS_LEN]) -> Result<Self, AddressError> {
        if chain.is_empty() || !chain.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AddressError::InvalidChainAlias(chain.to_string()));
        }
        let body = bech32::encode(hrp, payload.to_base32(), Variant::Bech32).map_err(|e| {
            AddressError::Bech32 {
                input: hrp.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            chain: chain.to_string(),
            hrp: hrp.to_string(),
            payload,
            rendered: format!("{}-{}", chain, body),
        })
    }

    /// Chain alias (`X`, `P`, …).
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// Human readable part (`lux`, `fuji`, `local`, …).
    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Raw 20-byte payload.
    pub fn payload(&self) -> &[u8; ADDRESS_LEN] {
        &self.payload
    }

    /// Same payload and hrp, rendered for another chain alias.
    pub fn with_chain(&self, chain: &str) -> Result<Self, AddressError> {
        Self::new(chain, &self.hrp, self.payload)
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl FromStr for ChainAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chain, body) = s
            .split_once('-')
            .ok_or_else(|| AddressError::MissingChainAlias(s.to_string()))?;

        let (hrp, data, variant) = bech32::decode(body).map_err(|e| AddressError::Bech32 {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        if variant != Variant::Bech32 {
            return Err(AddressError::Bech32 {
                input: s.to_string(),
                reason: "expected bech32, found bech32m".to_string(),
            });
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Bech32 {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        let payload: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::WrongLength(bytes.len()))?;

        Self::new(chain, &hrp, payload)
    }
}

/// A hex address on the execution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct ExecutionAddress([u8; ADDRESS_LEN]);

impl ExecutionAddress {
    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for ExecutionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ExecutionAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| AddressError::InvalidHex(s.to_string()))?;
        let bytes = hex::decode(digits).map_err(|_| AddressError::InvalidHex(s.to_string()))?;
        let arr: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::WrongLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> [u8; ADDRESS_LEN] {
        let mut p = [0u8; ADDRESS_LEN];
        for (i, b) in p.iter_mut().enumerate() {
            *b = i as u8 * 11;
        }
        p
    }

    #[test]
    fn test_encode_then_decode_yields_original_payload() {
        let addr = ChainAddress::new("X", "lux", sample_payload()).unwrap();
        let text = addr.to_string();
        assert!(text.starts_with("X-lux1"));

        let parsed: ChainAddress = text.parse().unwrap();
        assert_eq!(parsed.payload(), &sample_payload());
        assert_eq!(parsed.chain(), "X");
        assert_eq!(parsed.hrp(), "lux");
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn test_with_chain_keeps_payload() {
        let x = ChainAddress::new("X", "fuji", sample_payload()).unwrap();
        let p = x.with_chain("P").unwrap();
        assert_eq!(p.chain(), "P");
        assert_eq!(p.payload(), x.payload());
        assert!(p.to_string().starts_with("P-fuji1"));
        // The bech32 body is identical across chain aliases
        assert_eq!(
            p.to_string().trim_start_matches("P-"),
            x.to_string().trim_start_matches("X-")
        );
    }

    #[test]
    fn test_missing_chain_alias_rejected() {
        let body = ChainAddress::new("X", "lux", sample_payload())
            .unwrap()
            .to_string()
            .trim_start_matches("X-")
            .to_string();
        assert!(matches!(
            body.parse::<ChainAddress>(),
            Err(AddressError::MissingChainAlias(_))
        ));
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let mut text = ChainAddress::new("X", "lux", sample_payload())
            .unwrap()
            .to_string();
        let last = text.pop().unwrap();
        text.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(
            text.parse::<ChainAddress>(),
            Err(AddressError::Bech32 { .. })
        ));
    }

    #[test]
    fn test_execution_address_roundtrip() {
        let text = "0x8db97C7cEcE249c2b98bDC0226Cc4C2A57BF52FC";
        let addr: ExecutionAddress = text.parse().unwrap();
        assert_eq!(addr.to_string(), text.to_lowercase());
    }

    #[test]
    fn test_execution_address_requires_prefix_and_length() {
        assert!("8db97c7cece249c2b98bdc0226cc4c2a57bf52fc"
            .parse::<ExecutionAddress>()
            .is_err());
        assert!(matches!(
            "0x8db97c".parse::<ExecutionAddress>(),
            Err(AddressError::WrongLength(3))
        ));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let addr = ChainAddress::new("X", "local", sample_payload()).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        let back: ChainAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
