//! Shared test fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use gp_01_staker_store::{write_json_atomic, JsonDirectoryStore, StakerRecord};
use provision_runtime::ProvisionConfig;
use shared_types::{ChainAddress, ExecutionAddress, NodeId, SlotIndex};
use tempfile::TempDir;

/// Fixed genesis start so documents are reproducible.
pub const START_TIME: u64 = 1_700_000_000;

pub fn slot(index: u8) -> SlotIndex {
    SlotIndex::new(index).unwrap()
}

pub fn chain_address(seed: u8) -> ChainAddress {
    ChainAddress::new("X", "local", [seed; 20]).unwrap()
}

pub fn eth_address(seed: u8) -> ExecutionAddress {
    ExecutionAddress::from_bytes([seed; 20])
}

/// The identity the fake node binary reports for a seed.
pub fn node_id(seed: u8) -> NodeId {
    NodeId::from_short_id([seed; 20])
}

/// A scratch staking directory.
///
/// Each key file holds the `NodeID-…` text the fake node prints for it,
/// so resolution is deterministic per key pair.
pub struct StakingDir {
    pub dir: TempDir,
}

impl StakingDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn out_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    fn file(&self, index: u8, ext: &str) -> PathBuf {
        self.path()
            .join(format!("{}.{}", JsonDirectoryStore::file_stem(slot(index)), ext))
    }

    pub fn record_path(&self, index: u8) -> PathBuf {
        self.file(index, "json")
    }

    /// Unresolved record plus key material.
    pub fn add_slot(&self, index: u8, seed: u8) -> NodeId {
        self.add_record(index, seed);
        fs::write(self.file(index, "key"), node_id(seed).to_string()).unwrap();
        fs::write(self.file(index, "crt"), format!("cert-{}", seed)).unwrap();
        node_id(seed)
    }

    /// Unresolved record without key material.
    pub fn add_record(&self, index: u8, seed: u8) {
        let record = StakerRecord::new(&chain_address(seed), &eth_address(seed));
        write_json_atomic(&self.record_path(index), &record).unwrap();
    }

    /// Record that already carries an identity.
    pub fn add_resolved(&self, index: u8, seed: u8) -> NodeId {
        let mut record = StakerRecord::new(&chain_address(seed), &eth_address(seed));
        record.id = node_id(seed).to_string();
        write_json_atomic(&self.record_path(index), &record).unwrap();
        node_id(seed)
    }

    pub fn read_record(&self, index: u8) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.record_path(index)).unwrap()).unwrap()
    }

    /// Script standing in for the node binary.
    ///
    /// Prints start-up noise on both streams, then the identity stored in
    /// the key file (`$2`) on stderr, then blocks until killed.
    #[cfg(unix)]
    pub fn fake_node(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("fake-luxd");
        let script = concat!(
            "#!/bin/sh\n",
            "echo 'INFO initializing node'\n",
            "echo 'WARN no bootstrap peers configured' 1>&2\n",
            "printf '{\"nodeID\": \"%s\"}\\n' \"$(cat \"$2\")\" 1>&2\n",
            "exec sleep 30\n",
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Pipeline configuration rooted in this directory.
    pub fn config(&self) -> ProvisionConfig {
        let mut config = ProvisionConfig::default();
        config.staking.dir = self.path().to_path_buf();
        config.staking.out_dir = self.out_dir();
        config.genesis.start_time = Some(START_TIME);
        config.resolver.timeout_secs = 10;
        #[cfg(unix)]
        {
            config.resolver.node_binary = self.fake_node();
        }
        config
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
