//! # Core Provisioning Entities
//!
//! Slot indices and network names.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Number of validator slots scanned in a staking directory.
///
/// The store never discovers slots beyond this bound.
pub const MAX_SLOTS: u8 = 100;

/// Index of a validator slot, `0..MAX_SLOTS`.
///
/// Slot 0 is the primary validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// The primary validator slot.
    pub const PRIMARY: SlotIndex = SlotIndex(0);

    /// Returns `None` when `index >= MAX_SLOTS`.
    pub fn new(index: u8) -> Option<Self> {
        (index < MAX_SLOTS).then_some(Self(index))
    }

    /// Numeric value.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Whether this is slot 0.
    pub fn is_primary(&self) -> bool {
        self.0 == 0
    }

    /// Every slot in ascending order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..MAX_SLOTS).map(SlotIndex)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SlotIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid slot index: {}", s))?;
        SlotIndex::new(n).ok_or_else(|| format!("slot index {} out of range 0..{}", n, MAX_SLOTS))
    }
}

/// Networks with built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub enum NetworkName {
    /// Production network.
    Mainnet,
    /// Public test network.
    Testnet,
    /// Local development network.
    Local,
}

impl NetworkName {
    /// Lowercase name used in file names and registry keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkName::Mainnet => "mainnet",
            NetworkName::Testnet => "testnet",
            NetworkName::Local => "local",
        }
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkName::Mainnet),
            "testnet" | "fuji" => Ok(NetworkName::Testnet),
            "local" => Ok(NetworkName::Local),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}
