//! Command-line surface of `genesis-provision`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gp_01_staker_store::{JsonDirectoryStore, KeyMaterial};
use shared_types::{NetworkName, NodeId, SlotIndex};

use crate::config::ProvisionConfig;

/// Validator genesis and bootstrap identity provisioning
#[derive(Parser, Debug)]
#[command(name = "genesis-provision")]
#[command(about = "Resolve validator identities and build genesis and bootstrap files")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "GP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding staker records and TLS credentials
    #[arg(long, global = true)]
    pub staking_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the node identity of one key/certificate pair
    NodeId {
        /// Defaults to staker.key in the staking directory
        #[arg(long)]
        staker_key: Option<PathBuf>,
        /// Defaults to staker.crt in the staking directory
        #[arg(long)]
        staker_cert: Option<PathBuf>,
        /// Node executable used to derive the identity
        #[arg(long)]
        node_binary: Option<PathBuf>,
    },

    /// Fill in the identity of every staker record that lacks one
    ResolveIds {
        /// Replace identities that are already set
        #[arg(long)]
        reprovision: bool,
    },

    /// Write genesis_<network>.json from the staker records
    Genesis {
        #[arg(long)]
        network: Option<NetworkName>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Unix seconds; defaults to now
        #[arg(long)]
        start_time: Option<u64>,
    },

    /// Print a one-validator mainnet genesis
    SingleNodeGenesis {
        node_id: NodeId,
        bls_public_key: String,
        bls_proof: String,
    },

    /// Rebuild the bootstrap peer registry
    Bootstrappers {
        #[arg(long)]
        out_file: Option<PathBuf>,
        /// Peer address of one slot, as SLOT=IP:PORT (repeatable)
        #[arg(long = "address", value_parser = parse_slot_address)]
        addresses: Vec<(SlotIndex, SocketAddr)>,
    },

    /// resolve-ids, then genesis, then bootstrappers
    Provision {
        #[arg(long)]
        reprovision: bool,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Fold command-line overrides into the configuration.
    pub fn apply(&self, config: &mut ProvisionConfig) {
        if let Some(dir) = &self.staking_dir {
            config.staking.dir = dir.clone();
        }

        match &self.command {
            Command::NodeId { node_binary, .. } => {
                if let Some(binary) = node_binary {
                    config.resolver.node_binary = binary.clone();
                }
            }
            Command::Genesis {
                network,
                out_dir,
                start_time,
            } => {
                if let Some(network) = network {
                    config.genesis.network = *network;
                }
                if let Some(dir) = out_dir {
                    config.staking.out_dir = dir.clone();
                }
                if start_time.is_some() {
                    config.genesis.start_time = *start_time;
                }
            }
            Command::Bootstrappers { addresses, .. } => {
                for (slot, addr) in addresses {
                    config.registry.addresses.insert(slot.to_string(), *addr);
                }
            }
            Command::Provision { out_dir, .. } => {
                if let Some(dir) = out_dir {
                    config.staking.out_dir = dir.clone();
                }
            }
            Command::ResolveIds { .. } | Command::SingleNodeGenesis { .. } => {}
        }
    }

    /// Key pair named by `node-id`, falling back to the primary slot's
    /// files in the configured staking directory.
    pub fn key_material(&self, config: &ProvisionConfig) -> Option<KeyMaterial> {
        let Command::NodeId {
            staker_key,
            staker_cert,
            ..
        } = &self.command
        else {
            return None;
        };
        let stem = JsonDirectoryStore::file_stem(SlotIndex::PRIMARY);
        let dir = &config.staking.dir;
        Some(KeyMaterial::new(
            staker_key
                .clone()
                .unwrap_or_else(|| dir.join(format!("{}.key", stem))),
            staker_cert
                .clone()
                .unwrap_or_else(|| dir.join(format!("{}.crt", stem))),
        ))
    }

    /// Whether stdout carries a document rather than progress lines.
    pub fn prints_document(&self) -> bool {
        matches!(self.command, Command::SingleNodeGenesis { .. })
    }
}

/// `SLOT=IP:PORT`
pub fn parse_slot_address(s: &str) -> Result<(SlotIndex, SocketAddr), String> {
    let (slot, addr) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=IP:PORT, got {}", s))?;
    let slot = slot.trim().parse::<SlotIndex>()?;
    let addr = addr
        .trim()
        .parse::<SocketAddr>()
        .map_err(|e| format!("{}: {}", addr, e))?;
    Ok((slot, addr))
}

/// BLS fields are accepted with or without the `0x` prefix.
pub fn with_hex_prefix(value: &str) -> String {
    if value.starts_with("0x") {
        value.to_string()
    } else {
        format!("0x{}", value)
    }
}
