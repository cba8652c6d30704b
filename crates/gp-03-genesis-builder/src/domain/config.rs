//! Genesis builder configuration.
//!
//! Every field has a default so a TOML table may set any subset.

use serde::Deserialize;
use shared_types::{ChainAddress, ExecutionAddress, NetworkName};

use crate::domain::errors::GenesisError;
use crate::domain::network::NetworkPreset;
use crate::domain::unlock::UnlockPolicy;

/// Upper bound of `delegationFee` (parts per million).
pub const MAX_DELEGATION_FEE: u32 = 1_000_000;

/// How `cChainGenesis` is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionEncoding {
    /// JSON text inside a string field.
    #[default]
    String,
    /// Nested JSON object.
    Object,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutionGenesisConfig {
    /// Defaults to the network preset.
    pub chain_id: Option<u64>,
    pub gas_limit: u64,
    /// Hex wei balance of the funded account.
    pub balance: String,
    /// Funded account. Defaults to the first staker's execution address.
    pub funded_address: Option<ExecutionAddress>,
    pub encoding: ExecutionEncoding,
}

impl Default for ExecutionGenesisConfig {
    fn default() -> Self {
        Self {
            chain_id: None,
            gas_limit: 100_000_000,
            balance: "0x21e19e0c9bab2400000".to_string(),
            funded_address: None,
            encoding: ExecutionEncoding::String,
        }
    }
}

/// Genesis document configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub network: NetworkName,
    /// Overrides the preset network ID.
    pub network_id: Option<u32>,
    /// Amount allocated to each staker.
    pub initial_amount: u64,
    pub unlock: UnlockPolicy,
    pub delegation_fee: u32,
    /// Reward address for every staker. When unset, each staker is
    /// rewarded at its own allocation address on `reward_chain`.
    pub reward_address: Option<ChainAddress>,
    pub reward_chain: String,
    /// Optional explicit stake weight per staker.
    pub weight: Option<u64>,
    /// Genesis timestamp (Unix seconds). If None, uses current time.
    pub start_time: Option<u64>,
    pub initial_stake_duration: u64,
    pub initial_stake_duration_offset: u64,
    pub message: String,
    /// Also check each proof of possession cryptographically.
    pub verify_signers: bool,
    pub execution: ExecutionGenesisConfig,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            network: NetworkName::Local,
            network_id: None,
            initial_amount: 500_000_000_000_000_000,
            unlock: UnlockPolicy::Unlocked,
            delegation_fee: 20_000,
            reward_address: None,
            reward_chain: "P".to_string(),
            weight: None,
            start_time: None,
            initial_stake_duration: 31_536_000,
            initial_stake_duration_offset: 5_400,
            message: "genesis".to_string(),
            verify_signers: false,
            execution: ExecutionGenesisConfig::default(),
        }
    }
}

impl GenesisConfig {
    /// Configuration for a preset network.
    pub fn for_network(network: NetworkName) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    /// Single-validator mainnet launch configuration.
    pub fn single_node() -> Self {
        Self {
            network: NetworkName::Mainnet,
            network_id: Some(96369),
            execution: ExecutionGenesisConfig {
                chain_id: Some(96369),
                ..Default::default()
            },
            message: "Single node mainnet with BLS validation".to_string(),
            ..Default::default()
        }
    }

    pub fn preset(&self) -> NetworkPreset {
        NetworkPreset::for_network(self.network)
    }

    pub fn network_id(&self) -> u32 {
        self.network_id.unwrap_or(self.preset().network_id)
    }

    pub fn execution_chain_id(&self) -> u64 {
        self.execution.chain_id.unwrap_or(self.preset().execution_chain_id)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        if self.initial_amount == 0 {
            return Err(GenesisError::InvalidConfig(
                "initial amount must be positive".to_string(),
            ));
        }

        if self.delegation_fee > MAX_DELEGATION_FEE {
            return Err(GenesisError::InvalidConfig(format!(
                "delegation fee {} exceeds {}",
                self.delegation_fee, MAX_DELEGATION_FEE
            )));
        }

        if self.start_time == Some(0) {
            return Err(GenesisError::InvalidConfig(
                "start time must be a non-zero unix timestamp".to_string(),
            ));
        }

        if self.initial_stake_duration == 0 {
            return Err(GenesisError::InvalidConfig(
                "initial stake duration must be positive".to_string(),
            ));
        }

        if self.initial_stake_duration_offset > self.initial_stake_duration {
            return Err(GenesisError::InvalidConfig(
                "stake duration offset exceeds stake duration".to_string(),
            ));
        }

        if let Some(reward) = &self.reward_address {
            if reward.hrp() != self.preset().hrp {
                return Err(GenesisError::InvalidConfig(format!(
                    "reward address {} is not on network {}",
                    reward,
                    self.network
                )));
            }
        }

        Ok(())
    }
}
