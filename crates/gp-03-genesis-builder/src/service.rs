//! # Genesis Builder Service
//!
//! Validates staker records and folds them into a [`GenesisDocument`].

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use gp_01_staker_store::StakerRecord;
use shared_crypto::BlsSigner;
use shared_types::{ChainAddress, ExecutionAddress, NodeId, SlotIndex};
use tracing::{debug, info};

use crate::domain::config::{ExecutionEncoding, GenesisConfig};
use crate::domain::document::{
    Allocation, ExecutionPayload, GenesisDocument, InitialStaker, UnlockTranche,
};
use crate::domain::errors::GenesisError;
use crate::domain::execution::ExecutionGenesis;

/// Explicit identity and signer for a one-validator genesis.
#[derive(Debug, Clone)]
pub struct SingleNodeInput {
    pub node_id: NodeId,
    pub signer: BlsSigner,
    pub chain_address: ChainAddress,
    pub eth_address: ExecutionAddress,
}

/// A record that passed validation.
struct ValidatedStaker {
    node_id: NodeId,
    chain_address: ChainAddress,
    eth_address: ExecutionAddress,
    signer: Option<BlsSigner>,
}

/// Builder for genesis documents.
pub struct GenesisBuilder {
    config: GenesisConfig,
}

impl GenesisBuilder {
    /// Create a new genesis builder with configuration.
    pub fn new(config: GenesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenesisConfig {
        &self.config
    }

    /// Build the document from records in slot order.
    ///
    /// Nothing is written; callers pass the result to a `GenesisWriter`.
    pub fn build(&self, records: &[(SlotIndex, StakerRecord)]) -> Result<GenesisDocument, GenesisError> {
        self.config.validate()?;

        if records.is_empty() {
            return Err(GenesisError::NoEligibleStakers);
        }

        let stakers = self.validate_records(records)?;
        let schedule = self.config.unlock.schedule(self.config.initial_amount)?;
        self.assemble(&stakers, &schedule)
    }

    /// Build a genesis with exactly one validator.
    pub fn build_single_node(&self, input: &SingleNodeInput) -> Result<GenesisDocument, GenesisError> {
        let mut record = StakerRecord::new(&input.chain_address, &input.eth_address)
            .with_signer(&input.signer);
        record.id = input.node_id.to_string();
        self.build(&[(SlotIndex::PRIMARY, record)])
    }

    fn validate_records(
        &self,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<Vec<ValidatedStaker>, GenesisError> {
        let hrp = self.config.preset().hrp;
        let mut seen: HashMap<NodeId, SlotIndex> = HashMap::with_capacity(records.len());
        let mut stakers = Vec::with_capacity(records.len());

        for (slot, record) in records {
            let slot = *slot;
            let node_id = record
                .node_id()
                .map_err(|e| GenesisError::MalformedIdentity {
                    slot,
                    reason: e.to_string(),
                })?
                .ok_or(GenesisError::Unresolved { slot })?;

            if let Some(first) = seen.insert(node_id, slot) {
                return Err(GenesisError::DuplicateIdentity {
                    id: node_id,
                    first,
                    second: slot,
                });
            }

            let chain_address = record
                .chain_address
                .parse::<ChainAddress>()
                .map_err(|e| GenesisError::InvalidAddress {
                    slot,
                    field: "chainAddress",
                    reason: e.to_string(),
                })?;
            if chain_address.hrp() != hrp {
                return Err(GenesisError::InvalidAddress {
                    slot,
                    field: "chainAddress",
                    reason: format!("expected hrp {}, found {}", hrp, chain_address.hrp()),
                });
            }

            let eth_address = record
                .eth_address
                .parse::<ExecutionAddress>()
                .map_err(|e| GenesisError::InvalidAddress {
                    slot,
                    field: "ethAddress",
                    reason: e.to_string(),
                })?;

            let signer = self.validate_signer(slot, record)?;

            debug!("[gp-03] slot {} validated as {}", slot, node_id);
            stakers.push(ValidatedStaker {
                node_id,
                chain_address,
                eth_address,
                signer,
            });
        }

        Ok(stakers)
    }

    fn validate_signer(
        &self,
        slot: SlotIndex,
        record: &StakerRecord,
    ) -> Result<Option<BlsSigner>, GenesisError> {
        let signer = match (&record.bls_public_key, &record.bls_proof_of_possession) {
            (None, None) => return Ok(None),
            (Some(pk), Some(pop)) => {
                BlsSigner::from_hex(pk, pop).map_err(|e| GenesisError::InvalidSigner {
                    slot,
                    reason: e.to_string(),
                })?
            }
            _ => {
                return Err(GenesisError::InvalidSigner {
                    slot,
                    reason: "blsPublicKey and blsProofOfPossession must both be present".into(),
                })
            }
        };

        if self.config.verify_signers {
            signer
                .verify_proof_of_possession()
                .map_err(|e| GenesisError::InvalidSigner {
                    slot,
                    reason: e.to_string(),
                })?;
        }
        Ok(Some(signer))
    }

    fn reward_address(&self, staker: &ValidatedStaker) -> Result<ChainAddress, GenesisError> {
        match &self.config.reward_address {
            Some(address) => Ok(address.clone()),
            None => staker
                .chain_address
                .with_chain(&self.config.reward_chain)
                .map_err(|e| GenesisError::InvalidConfig(format!("reward chain: {}", e))),
        }
    }

    fn assemble(
        &self,
        stakers: &[ValidatedStaker],
        schedule: &[UnlockTranche],
    ) -> Result<GenesisDocument, GenesisError> {
        let config = &self.config;

        let mut allocations = Vec::with_capacity(stakers.len());
        let mut initial_stakers = Vec::with_capacity(stakers.len());

        for staker in stakers {
            allocations.push(Allocation {
                eth_addr: staker.eth_address,
                lux_addr: staker.chain_address.clone(),
                initial_amount: config.initial_amount,
                unlock_schedule: schedule.to_vec(),
            });

            initial_stakers.push(InitialStaker {
                node_id: staker.node_id,
                reward_address: self.reward_address(staker)?,
                delegation_fee: config.delegation_fee,
                weight: config.weight,
                signer: staker.signer.clone(),
            });
        }

        let mut seen = HashSet::new();
        let initial_staked_funds: Vec<ChainAddress> = allocations
            .iter()
            .map(|a| a.lux_addr.clone())
            .filter(|addr| seen.insert(addr.clone()))
            .collect();

        let funded = config
            .execution
            .funded_address
            .unwrap_or(stakers[0].eth_address);
        let execution = ExecutionGenesis::new(
            config.execution_chain_id(),
            config.execution.gas_limit,
            &funded,
            &config.execution.balance,
        );
        let c_chain_genesis = match config.execution.encoding {
            ExecutionEncoding::String => ExecutionPayload::Encoded(serde_json::to_string(&execution)?),
            ExecutionEncoding::Object => ExecutionPayload::Object(execution),
        };

        let start_time = config
            .start_time
            .unwrap_or_else(|| Utc::now().timestamp().max(1) as u64);

        let document = GenesisDocument {
            network_id: config.network_id(),
            allocations,
            start_time,
            initial_stake_duration: config.initial_stake_duration,
            initial_stake_duration_offset: config.initial_stake_duration_offset,
            initial_staked_funds,
            initial_stakers,
            c_chain_genesis,
            message: config.message.clone(),
        };
        let supply = document
            .total_supply()
            .ok_or(GenesisError::SupplyOverflow)?;

        info!(
            "[gp-03] built genesis for network {} ({}): {} stakers, total supply {}",
            config.network,
            config.network_id(),
            document.initial_stakers.len(),
            supply
        );
        Ok(document)
    }
}
