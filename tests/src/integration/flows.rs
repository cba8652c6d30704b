//! # Cross-Crate Flows
//!
//! Invariants that hold across the store and both document builders,
//! exercised on real staking directories without a node binary.

use std::collections::HashSet;
use std::fs;

use gp_01_staker_store::{JsonDirectoryStore, RecordPatch, StakerStore, StoreError};
use gp_03_genesis_builder::{GenesisBuilder, GenesisError};
use gp_04_bootstrap_registry::{BootstrapRegistryBuilder, RegistryConfig, RegistryFile};
use provision_runtime::Pipeline;
use shared_types::{ChainAddress, Classify, ErrorKind};

use super::fixtures::*;

fn scan(staking: &StakingDir) -> Vec<(shared_types::SlotIndex, gp_01_staker_store::StakerRecord)> {
    JsonDirectoryStore::open_read_only(staking.path())
        .unwrap()
        .scan()
        .unwrap()
}

#[test]
fn test_k_stakers_k_allocations() {
    let staking = StakingDir::new();
    for (index, seed) in [(0, 1), (1, 2), (2, 3), (7, 4)] {
        staking.add_resolved(index, seed);
    }
    // Slot 9 shares slot 0's allocation address.
    let mut shared = gp_01_staker_store::StakerRecord::new(&chain_address(1), &eth_address(9));
    shared.id = node_id(9).to_string();
    gp_01_staker_store::write_json_atomic(&staking.record_path(9), &shared).unwrap();

    let records = scan(&staking);
    assert_eq!(records.len(), 5);

    let document = GenesisBuilder::new(staking.config().genesis)
        .build(&records)
        .unwrap();
    assert_eq!(document.initial_stakers.len(), 5);
    assert_eq!(document.allocations.len(), 5);

    let allocated: HashSet<&ChainAddress> =
        document.allocations.iter().map(|a| &a.lux_addr).collect();
    assert_eq!(document.initial_staked_funds.len(), 4);
    for funded in &document.initial_staked_funds {
        assert!(allocated.contains(funded));
    }
}

#[test]
fn test_duplicate_identity_leaves_previous_files() {
    let staking = StakingDir::new();
    staking.add_resolved(0, 1);
    staking.add_resolved(1, 2);

    let pipeline = Pipeline::new(staking.config());
    let genesis_path = pipeline.write_genesis().unwrap();
    let (registry_path, _) = pipeline.write_bootstrappers(None).unwrap();
    let genesis_before = fs::read(&genesis_path).unwrap();
    let registry_before = fs::read(&registry_path).unwrap();

    // Slot 2 claims slot 0's identity.
    staking.add_record(2, 3);
    let mut store = JsonDirectoryStore::open(staking.path()).unwrap();
    store
        .write(slot(2), &RecordPatch::identity(node_id(1)))
        .unwrap();
    drop(store);

    let err = pipeline.write_genesis().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    let err = pipeline.write_bootstrappers(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);

    assert_eq!(fs::read(&genesis_path).unwrap(), genesis_before);
    assert_eq!(fs::read(&registry_path).unwrap(), registry_before);
}

#[test]
fn test_zero_records_write_nothing() {
    let staking = StakingDir::new();
    let pipeline = Pipeline::new(staking.config());

    let err = pipeline.write_genesis().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
    let err = pipeline.write_bootstrappers(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);

    assert!(!staking.out_dir().exists());
}

#[test]
fn test_registry_rebuild_keeps_unmanaged_networks() {
    let staking = StakingDir::new();
    staking.add_resolved(0, 1);
    staking.add_resolved(3, 2);

    let file = RegistryFile::in_dir(staking.path());
    fs::write(
        file.path(),
        r#"{"custom": [{"id": "operator-managed", "ip": "192.0.2.1:9651"}], "mainnet": []}"#,
    )
    .unwrap();

    let mut config = RegistryConfig::default();
    config
        .addresses
        .insert("3".to_string(), "10.0.0.4:9651".parse().unwrap());
    let builder = BootstrapRegistryBuilder::new(config);
    let records = scan(&staking);

    builder.write(&file, &records).unwrap();
    let first = fs::read(file.path()).unwrap();
    builder.write(&file, &records).unwrap();
    assert_eq!(fs::read(file.path()).unwrap(), first);

    let registry = read_json(file.path());
    assert_eq!(registry["custom"][0]["id"], "operator-managed");
    assert_eq!(registry["mainnet"][0]["ip"], "127.0.0.1:9651");
    assert_eq!(registry["mainnet"][1]["ip"], "10.0.0.4:9651");
    assert_eq!(registry["testnet"], registry["mainnet"]);
}

#[test]
fn test_unresolved_record_rejected_by_builder() {
    let staking = StakingDir::new();
    staking.add_resolved(0, 1);
    staking.add_record(1, 2);

    let err = GenesisBuilder::new(staking.config().genesis)
        .build(&scan(&staking))
        .unwrap_err();
    assert!(matches!(err, GenesisError::Unresolved { slot: s } if s == slot(1)));
}

#[test]
fn test_store_lock_is_exclusive() {
    let staking = StakingDir::new();
    staking.add_record(0, 1);

    let store = JsonDirectoryStore::open(staking.path()).unwrap();
    assert!(matches!(
        JsonDirectoryStore::open(staking.path()),
        Err(StoreError::Locked { .. })
    ));

    // Readers are not blocked.
    assert_eq!(scan(&staking).len(), 1);

    drop(store);
    assert!(JsonDirectoryStore::open(staking.path()).is_ok());
}

#[test]
fn test_address_round_trip() {
    let original = chain_address(0x5a);
    let parsed: ChainAddress = original.to_string().parse().unwrap();
    assert_eq!(parsed.payload(), original.payload());
    assert_eq!(parsed.hrp(), "local");

    let reward = parsed.with_chain("P").unwrap();
    assert!(reward.to_string().starts_with("P-local1"));
    assert_eq!(reward.payload(), original.payload());
}
