//! # Provisioning Configuration
//!
//! Unified configuration for every pipeline stage.
//!
//! ## Precedence
//!
//! | Layer | Source |
//! |-------|--------|
//! | 1 | `Default` impls |
//! | 2 | TOML file passed with `--config` |
//! | 3 | `GP_*` environment variables |
//! | 4 | command-line flags |
//!
//! ## Config File Format
//!
//! ```toml
//! [staking]
//! dir = "/home/lux/.luxd/staking"
//! out_dir = "./out"
//!
//! [resolver]
//! node_binary = "/usr/local/bin/luxd"
//! timeout_secs = 30
//!
//! [genesis]
//! network = "testnet"
//! delegation_fee = 20000
//! unlock = { kind = "locked_until", locktime = 1735689600 }
//!
//! [registry]
//! base_port = 9651
//! networks = ["mainnet", "testnet"]
//!
//! [registry.addresses]
//! 0 = "10.0.0.1:9651"
//!
//! [single_node]
//! chain_address = "X-lux1..."
//! eth_address = "0x..."
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use gp_02_node_identity::ResolverConfig;
use gp_03_genesis_builder::GenesisConfig;
use gp_04_bootstrap_registry::RegistryConfig;
use serde::Deserialize;
use shared_types::{AddressError, ChainAddress, ExecutionAddress, NetworkName};
use thiserror::Error;

/// Staking directory relative to `$HOME`.
pub const DEFAULT_STAKING_SUBDIR: &str = ".luxd/staking";

/// Complete provisioning configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    pub staking: StakingConfig,
    pub resolver: ResolverConfig,
    pub genesis: GenesisConfig,
    pub registry: RegistryConfig,
    pub single_node: SingleNodeConfig,
}

/// Where records are read and documents written.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Directory holding `staker*.json`, `.key` and `.crt` files.
    pub dir: PathBuf,
    /// Output directory for genesis and registry files.
    pub out_dir: PathBuf,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            dir: default_staking_dir(),
            out_dir: PathBuf::from("."),
        }
    }
}

/// Primary addresses of a one-validator network.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SingleNodeConfig {
    /// Defaults to the primary X-chain address.
    pub chain_address: Option<ChainAddress>,
    /// Defaults to the primary execution account.
    pub eth_address: Option<ExecutionAddress>,
}

impl SingleNodeConfig {
    pub fn chain_address(&self) -> Result<ChainAddress, AddressError> {
        match &self.chain_address {
            Some(address) => Ok(address.clone()),
            None => ChainAddress::new("X", "lux", PRIMARY_ADDRESS_PAYLOAD),
        }
    }

    pub fn eth_address(&self) -> ExecutionAddress {
        self.eth_address
            .unwrap_or_else(|| ExecutionAddress::from_bytes(PRIMARY_ETH_ADDRESS))
    }
}

const PRIMARY_ADDRESS_PAYLOAD: [u8; 20] = [
    0x3c, 0xb7, 0xd3, 0x84, 0x2e, 0x8c, 0xee, 0x6a, 0x0e, 0xbd, 0x09, 0xf1, 0xfe, 0x88, 0x4f,
    0x68, 0x61, 0xe1, 0xb2, 0x9c,
];

const PRIMARY_ETH_ADDRESS: [u8; 20] = [
    0x8d, 0xb9, 0x7c, 0x7c, 0xec, 0xe2, 0x49, 0xc2, 0xb9, 0x8b, 0xdc, 0x02, 0x26, 0xcc, 0x4c,
    0x2a, 0x57, 0xbf, 0x52, 0xfc,
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("cannot parse config: {0}")]
    Parse(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

impl ProvisionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `GP_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup("GP_NETWORK") {
            self.genesis.network =
                network
                    .parse::<NetworkName>()
                    .map_err(|reason| ConfigError::InvalidEnv {
                        var: "GP_NETWORK",
                        reason,
                    })?;
        }
        if let Some(address) = lookup("GP_REWARD_ADDRESS") {
            let address =
                address
                    .parse::<ChainAddress>()
                    .map_err(|e| ConfigError::InvalidEnv {
                        var: "GP_REWARD_ADDRESS",
                        reason: e.to_string(),
                    })?;
            self.genesis.reward_address = Some(address);
        }
        if let Some(binary) = lookup("GP_NODE_BINARY") {
            self.resolver.node_binary = PathBuf::from(binary);
        }
        if let Some(dir) = lookup("GP_STAKING_DIR") {
            self.staking.dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

/// `$HOME/.luxd/staking`, or a relative path when `HOME` is unset.
pub fn default_staking_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(DEFAULT_STAKING_SUBDIR),
        None => PathBuf::from(DEFAULT_STAKING_SUBDIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_03_genesis_builder::UnlockPolicy;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ProvisionConfig::default();
        assert!(config.staking.dir.ends_with(DEFAULT_STAKING_SUBDIR));
        assert_eq!(config.staking.out_dir, PathBuf::from("."));
        assert_eq!(config.resolver.node_binary, PathBuf::from("luxd"));
        assert_eq!(config.registry.base_port, 9651);
        assert_eq!(config.genesis.network, NetworkName::Local);
    }

    #[test]
    fn test_single_node_addresses() {
        let config = SingleNodeConfig::default();
        let chain_address = config.chain_address().unwrap();
        assert_eq!(chain_address.chain(), "X");
        assert_eq!(chain_address.hrp(), "lux");
        assert_eq!(
            chain_address.to_string(),
            "X-lux18jma8ppw3nhx5r4ap8clazz0dps7rv5uv98e28"
        );
        assert_eq!(
            config.eth_address().to_string(),
            "0x8db97c7cece249c2b98bdc0226cc4c2a57bf52fc"
        );
    }

    #[test]
    fn test_parse_sections() {
        let config = ProvisionConfig::parse(
            r#"
            [staking]
            dir = "/srv/staking"

            [resolver]
            node_binary = "/opt/luxd"
            timeout_secs = 5

            [genesis]
            network = "testnet"
            delegation_fee = 30000
            unlock = { kind = "locked_until", locktime = 1735689600 }

            [registry]
            base_port = 19651
            networks = ["testnet"]

            [registry.addresses]
            2 = "10.0.0.3:9651"
            "#,
        )
        .unwrap();

        assert_eq!(config.staking.dir, PathBuf::from("/srv/staking"));
        assert_eq!(config.staking.out_dir, PathBuf::from("."));
        assert_eq!(config.resolver.timeout_secs, 5);
        assert_eq!(config.genesis.network, NetworkName::Testnet);
        assert_eq!(config.genesis.delegation_fee, 30000);
        assert_eq!(
            config.genesis.unlock,
            UnlockPolicy::LockedUntil {
                locktime: 1735689600
            }
        );
        assert_eq!(config.registry.base_port, 19651);
        assert_eq!(config.registry.networks, vec!["testnet".to_string()]);
        assert_eq!(
            config.registry.addresses["2"],
            "10.0.0.3:9651".parse().unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ProvisionConfig::parse("[genesis]\nnetwork = 7"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProvisionConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GP_NETWORK", "fuji"),
            ("GP_NODE_BINARY", "/usr/bin/luxd"),
            ("GP_STAKING_DIR", "/tmp/staking"),
        ]
        .into_iter()
        .collect();

        let mut config = ProvisionConfig::default();
        config
            .apply_env_from(|var| vars.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.genesis.network, NetworkName::Testnet);
        assert_eq!(config.resolver.node_binary, PathBuf::from("/usr/bin/luxd"));
        assert_eq!(config.staking.dir, PathBuf::from("/tmp/staking"));
        assert!(config.genesis.reward_address.is_none());
    }

    #[test]
    fn test_env_invalid_reward_address() {
        let mut config = ProvisionConfig::default();
        let result = config.apply_env_from(|var| {
            (var == "GP_REWARD_ADDRESS").then(|| "P-not-bech32".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv {
                var: "GP_REWARD_ADDRESS",
                ..
            })
        ));
    }
}
