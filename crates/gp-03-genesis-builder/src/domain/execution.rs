//! Execution-chain genesis embedded in the network genesis.
//!
//! Opaque to the network genesis: it is only required to encode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::ExecutionAddress;

const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Fork schedule. Every historical fork is active from block 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: u64,
    pub homestead_block: u64,
    pub eip150_block: u64,
    pub eip155_block: u64,
    pub eip158_block: u64,
    pub byzantium_block: u64,
    pub constantinople_block: u64,
    pub petersburg_block: u64,
    pub istanbul_block: u64,
    pub muir_glacier_block: u64,
    pub berlin_block: u64,
    pub london_block: u64,
}

impl ChainConfig {
    pub fn all_forks_at_genesis(chain_id: u64) -> Self {
        Self {
            chain_id,
            homestead_block: 0,
            eip150_block: 0,
            eip155_block: 0,
            eip158_block: 0,
            byzantium_block: 0,
            constantinople_block: 0,
            petersburg_block: 0,
            istanbul_block: 0,
            muir_glacier_block: 0,
            berlin_block: 0,
            london_block: 0,
        }
    }
}

/// Balance entry of the `alloc` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    /// Hex wei amount.
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionGenesis {
    pub config: ChainConfig,
    pub nonce: String,
    pub timestamp: String,
    pub extra_data: String,
    pub gas_limit: String,
    pub difficulty: String,
    pub mix_hash: String,
    pub coinbase: String,
    pub alloc: BTreeMap<String, GenesisAccount>,
}

impl ExecutionGenesis {
    /// Zeroed header with a single funded account.
    pub fn new(chain_id: u64, gas_limit: u64, funded: &ExecutionAddress, balance: &str) -> Self {
        let mut alloc = BTreeMap::new();
        alloc.insert(
            funded.to_string(),
            GenesisAccount {
                balance: balance.to_string(),
            },
        );
        Self {
            config: ChainConfig::all_forks_at_genesis(chain_id),
            nonce: "0x0".into(),
            timestamp: "0x0".into(),
            extra_data: "0x00".into(),
            gas_limit: format!("{:#x}", gas_limit),
            difficulty: "0x0".into(),
            mix_hash: ZERO_HASH.into(),
            coinbase: ZERO_ADDRESS.into(),
            alloc,
        }
    }
}
