//! Registry configuration.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;
use shared_types::SlotIndex;

use crate::domain::errors::RegistryError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Host of derived peer addresses.
    pub host: IpAddr,
    /// Port of slot 0; slot *n* listens on `base_port + 2n`.
    pub base_port: u16,
    /// Networks rebuilt on every run.
    pub networks: Vec<String>,
    /// Per-slot address overrides, keyed by slot number.
    pub addresses: BTreeMap<String, SocketAddr>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            base_port: 9651,
            networks: vec!["mainnet".to_string(), "testnet".to_string()],
            addresses: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Parsed address overrides.
    pub fn overrides(&self) -> Result<BTreeMap<SlotIndex, SocketAddr>, RegistryError> {
        self.addresses
            .iter()
            .map(|(slot, addr)| {
                slot.parse::<SlotIndex>()
                    .map(|slot| (slot, *addr))
                    .map_err(RegistryError::InvalidConfig)
            })
            .collect()
    }

    /// Address of a slot without an override.
    pub fn derived_address(&self, slot: SlotIndex) -> Result<SocketAddr, RegistryError> {
        let port = u16::from(slot.get())
            .checked_mul(2)
            .and_then(|offset| self.base_port.checked_add(offset))
            .ok_or_else(|| {
                RegistryError::InvalidConfig(format!(
                    "port for slot {} overflows from base {}",
                    slot, self.base_port
                ))
            })?;
        Ok(SocketAddr::new(self.host, port))
    }
}
