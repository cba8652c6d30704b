//! Registry entities.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::NodeId;

/// One bootstrap peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapEntry {
    pub id: NodeId,
    pub ip: SocketAddr,
}

/// Network name → peer list.
///
/// Values are kept as raw JSON so networks this tool does not manage
/// survive a rebuild exactly as they were.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BootstrapRegistry {
    networks: BTreeMap<String, Value>,
}

impl BootstrapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a network's sequence in full.
    pub fn set_network(&mut self, network: &str, entries: &[BootstrapEntry]) -> Result<(), serde_json::Error> {
        self.networks
            .insert(network.to_string(), serde_json::to_value(entries)?);
        Ok(())
    }

    /// Decode a network's sequence.
    pub fn entries(&self, network: &str) -> Option<Result<Vec<BootstrapEntry>, serde_json::Error>> {
        self.networks
            .get(network)
            .map(|v| serde_json::from_value(v.clone()))
    }

    pub fn networks(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_form() {
        let entry = BootstrapEntry {
            id: NodeId::from_short_id([1; 20]),
            ip: "127.0.0.1:9651".parse().unwrap(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["ip"], "127.0.0.1:9651");
        assert_eq!(json["id"], entry.id.to_string());
    }

    #[test]
    fn test_foreign_network_kept_verbatim() {
        let text = r#"{"custom":[{"id":"whatever","ip":"x","extra":true}],"mainnet":[]}"#;
        let mut registry: BootstrapRegistry = serde_json::from_str(text).unwrap();
        registry.set_network("mainnet", &[]).unwrap();

        let out = serde_json::to_value(&registry).unwrap();
        assert_eq!(out["custom"][0]["extra"], true);
        assert_eq!(registry.networks().collect::<Vec<_>>(), vec!["custom", "mainnet"]);
    }
}
