//! Network presets.

use shared_types::NetworkName;

/// Identifiers a network's genesis is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPreset {
    pub network_id: u32,
    /// Bech32 human-readable part of native-chain addresses.
    pub hrp: &'static str,
    pub execution_chain_id: u64,
}

impl NetworkPreset {
    pub const MAINNET: NetworkPreset = NetworkPreset {
        network_id: 1,
        hrp: "lux",
        execution_chain_id: 1990,
    };

    pub const TESTNET: NetworkPreset = NetworkPreset {
        network_id: 5,
        hrp: "fuji",
        execution_chain_id: 1991,
    };

    pub const LOCAL: NetworkPreset = NetworkPreset {
        network_id: 12345,
        hrp: "local",
        execution_chain_id: 1337,
    };

    pub fn for_network(network: NetworkName) -> Self {
        match network {
            NetworkName::Mainnet => Self::MAINNET,
            NetworkName::Testnet => Self::TESTNET,
            NetworkName::Local => Self::LOCAL,
        }
    }
}
