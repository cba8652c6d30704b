//! # Bootstrap Registry Service

use std::collections::HashMap;

use gp_01_staker_store::StakerRecord;
use shared_types::{NodeId, SlotIndex};
use tracing::info;

use crate::adapters::file::RegistryFile;
use crate::domain::config::RegistryConfig;
use crate::domain::entities::{BootstrapEntry, BootstrapRegistry};
use crate::domain::errors::RegistryError;

pub struct BootstrapRegistryBuilder {
    config: RegistryConfig,
}

impl BootstrapRegistryBuilder {
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Peer entries in slot order.
    pub fn entries(
        &self,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<Vec<BootstrapEntry>, RegistryError> {
        if records.is_empty() {
            return Err(RegistryError::NoEligibleStakers);
        }

        let overrides = self.config.overrides()?;
        let mut seen: HashMap<NodeId, SlotIndex> = HashMap::with_capacity(records.len());
        let mut entries = Vec::with_capacity(records.len());

        for (slot, record) in records {
            let slot = *slot;
            let id = record
                .node_id()
                .map_err(|e| RegistryError::MalformedIdentity {
                    slot,
                    reason: e.to_string(),
                })?
                .ok_or(RegistryError::Unresolved { slot })?;

            if let Some(first) = seen.insert(id, slot) {
                return Err(RegistryError::DuplicateIdentity {
                    id,
                    first,
                    second: slot,
                });
            }

            let ip = match overrides.get(&slot) {
                Some(addr) => *addr,
                None => self.config.derived_address(slot)?,
            };
            entries.push(BootstrapEntry { id, ip });
        }

        Ok(entries)
    }

    /// Replace the target networks in `existing`, keeping all others.
    pub fn rebuild(
        &self,
        mut existing: BootstrapRegistry,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<BootstrapRegistry, RegistryError> {
        let entries = self.entries(records)?;
        for network in &self.config.networks {
            existing.set_network(network, &entries)?;
        }
        Ok(existing)
    }

    /// Load, rebuild and atomically store a registry file.
    pub fn write(
        &self,
        file: &RegistryFile,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<BootstrapRegistry, RegistryError> {
        let registry = self.rebuild(file.load()?, records)?;
        file.store(&registry)?;
        info!(
            "[gp-04] wrote {} bootstrap peers for [{}] to {}",
            records.len(),
            self.config.networks.join(", "),
            file.path().display()
        );
        Ok(registry)
    }
}
