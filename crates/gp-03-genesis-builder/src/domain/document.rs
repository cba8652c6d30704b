//! Genesis document wire types.
//!
//! Field names follow the node's genesis format exactly.

use serde::{Deserialize, Serialize};
use shared_crypto::BlsSigner;
use shared_types::{ChainAddress, ExecutionAddress, NodeId};

use crate::domain::execution::ExecutionGenesis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockTranche {
    pub amount: u64,
    pub locktime: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub eth_addr: ExecutionAddress,
    pub lux_addr: ChainAddress,
    pub initial_amount: u64,
    pub unlock_schedule: Vec<UnlockTranche>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialStaker {
    #[serde(rename = "nodeID")]
    pub node_id: NodeId,
    pub reward_address: ChainAddress,
    pub delegation_fee: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<BlsSigner>,
}

/// The execution genesis, either nested or pre-serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionPayload {
    Encoded(String),
    Object(ExecutionGenesis),
}

impl ExecutionPayload {
    /// The nested genesis regardless of encoding.
    pub fn decode(&self) -> Result<ExecutionGenesis, serde_json::Error> {
        match self {
            ExecutionPayload::Encoded(text) => serde_json::from_str(text),
            ExecutionPayload::Object(genesis) => Ok(genesis.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisDocument {
    #[serde(rename = "networkID")]
    pub network_id: u32,
    pub allocations: Vec<Allocation>,
    pub start_time: u64,
    pub initial_stake_duration: u64,
    pub initial_stake_duration_offset: u64,
    pub initial_staked_funds: Vec<ChainAddress>,
    pub initial_stakers: Vec<InitialStaker>,
    #[serde(rename = "cChainGenesis")]
    pub c_chain_genesis: ExecutionPayload,
    pub message: String,
}

impl GenesisDocument {
    /// Sum of all initial amounts, `None` on overflow.
    pub fn total_supply(&self) -> Option<u64> {
        self.allocations
            .iter()
            .try_fold(0u64, |acc, a| acc.checked_add(a.initial_amount))
    }
}
