//! # End-to-End Provisioning
//!
//! Runs the real subprocess resolver against a fake node binary, then feeds
//! the patched staking directory into the document builders.
//!
//! ```text
//! staker.json (id unset) + staker.key/.crt
//!        │  SubprocessResolver → fake-luxd
//!        ↓
//! staker.json (id = NodeID-…)
//!        │  GenesisBuilder / BootstrapRegistryBuilder
//!        ↓
//! genesis_local.json, bootstrappers.json
//! ```

use std::fs;

use clap::Parser;
use gp_01_staker_store::{JsonDirectoryStore, KeyMaterial, StakerStore};
use gp_02_node_identity::{IdentityProvisioner, IdentityResolver, SlotOutcome, SubprocessResolver};
use gp_03_genesis_builder::{GenesisBuilder, GenesisWriter};
use provision_runtime::{Cli, Pipeline};
use shared_types::{Classify, ErrorKind, NetworkName};

use super::fixtures::*;

#[tokio::test]
async fn test_single_record_resolves_into_genesis() {
    let staking = StakingDir::new();
    let expected = staking.add_slot(0, 7);
    let config = staking.config();
    let reward = chain_address(0xee).with_chain("P").unwrap();

    // Resolve
    let resolver = SubprocessResolver::new(config.resolver.clone());
    let report = {
        let mut store = JsonDirectoryStore::open(staking.path()).unwrap();
        IdentityProvisioner::new(resolver)
            .resolve_all(&mut store)
            .await
            .unwrap()
    };
    assert_eq!(report.outcome(slot(0)), Some(&SlotOutcome::Resolved(expected)));
    assert_eq!(staking.read_record(0)["id"], expected.to_string());

    // Build
    let mut genesis = config.genesis.clone();
    genesis.reward_address = Some(reward.clone());
    let records = JsonDirectoryStore::open_read_only(staking.path())
        .unwrap()
        .scan()
        .unwrap();
    let document = GenesisBuilder::new(genesis.clone()).build(&records).unwrap();

    assert_eq!(document.initial_stakers.len(), 1);
    assert_eq!(document.initial_stakers[0].node_id, expected);
    assert_eq!(document.initial_stakers[0].reward_address, reward);
    assert_eq!(document.allocations.len(), 1);
    let scheduled: u64 = document.allocations[0]
        .unlock_schedule
        .iter()
        .map(|t| t.amount)
        .sum();
    assert_eq!(scheduled, genesis.initial_amount);
    assert_eq!(document.initial_staked_funds, vec![chain_address(7)]);

    // Write
    let path = GenesisWriter::new(staking.out_dir())
        .write(&document, NetworkName::Local)
        .unwrap();
    let written = read_json(&path);
    assert_eq!(written["initialStakers"][0]["nodeID"], expected.to_string());
    assert_eq!(written["startTime"], START_TIME);
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let staking = StakingDir::new();
    staking.add_slot(0, 3);
    let config = staking.config();
    let key = KeyMaterial::new(staking.path().join("staker.key"), staking.path().join("staker.crt"));

    let resolver = SubprocessResolver::new(config.resolver.clone());
    let first = resolver.resolve(&key).await.unwrap();
    let second = resolver.resolve(&key).await.unwrap();
    assert_eq!(first, second);

    let provisioner = IdentityProvisioner::new(resolver);
    let mut store = JsonDirectoryStore::open(staking.path()).unwrap();
    provisioner.resolve_all(&mut store).await.unwrap();
    let after_first = fs::read(staking.record_path(0)).unwrap();

    let report = provisioner.resolve_all(&mut store).await.unwrap();
    assert_eq!(report.already_resolved(), 1);
    assert_eq!(fs::read(staking.record_path(0)).unwrap(), after_first);
}

#[tokio::test]
async fn test_provision_runs_every_stage() {
    let staking = StakingDir::new();
    let ids = [
        staking.add_slot(0, 1),
        staking.add_slot(1, 2),
        staking.add_slot(4, 3),
    ];

    let pipeline = Pipeline::new(staking.config());
    let summary = pipeline.provision(false).await.unwrap();
    assert_eq!(summary.report.resolved(), 3);

    let genesis = read_json(&summary.genesis_path);
    let stakers = genesis["initialStakers"].as_array().unwrap();
    assert_eq!(stakers.len(), 3);
    for (staker, id) in stakers.iter().zip(&ids) {
        assert_eq!(staker["nodeID"], id.to_string());
    }
    assert_eq!(genesis["networkID"], 12345);

    let registry = read_json(&summary.registry_path);
    for network in ["mainnet", "testnet"] {
        let peers = registry[network].as_array().unwrap();
        assert_eq!(peers.len(), 3);
        assert_eq!(peers[2]["id"], ids[2].to_string());
        assert_eq!(peers[2]["ip"], "127.0.0.1:9659");
    }

    // Second run leaves the registry byte-identical.
    let before = fs::read(&summary.registry_path).unwrap();
    pipeline.write_bootstrappers(None).unwrap();
    assert_eq!(fs::read(&summary.registry_path).unwrap(), before);
}

#[tokio::test]
async fn test_missing_key_material_excludes_slot_from_documents() {
    let staking = StakingDir::new();
    let primary = staking.add_slot(0, 1);
    staking.add_record(1, 2);

    let pipeline = Pipeline::new(staking.config());
    let summary = pipeline.provision(false).await.unwrap();
    assert_eq!(summary.report.resolved(), 1);
    assert_eq!(summary.report.skipped(), 1);
    assert!(matches!(
        summary.report.outcome(slot(1)),
        Some(SlotOutcome::Skipped(_))
    ));
    assert_eq!(summary.validators, vec![slot(0)]);

    let genesis = read_json(&summary.genesis_path);
    let stakers = genesis["initialStakers"].as_array().unwrap();
    assert_eq!(stakers.len(), 1);
    assert_eq!(stakers[0]["nodeID"], primary.to_string());
    assert_eq!(genesis["allocations"].as_array().unwrap().len(), 1);

    let registry = read_json(&summary.registry_path);
    let peers = registry["mainnet"].as_array().unwrap();
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0]["id"], primary.to_string());

    // The skipped record is left for a later pass.
    assert_eq!(staking.read_record(1)["id"], "");
}

#[tokio::test]
async fn test_no_resolvable_slot_writes_nothing() {
    let staking = StakingDir::new();
    staking.add_record(0, 1);
    staking.add_record(3, 2);

    let pipeline = Pipeline::new(staking.config());
    let err = pipeline.provision(false).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);
    assert!(!staking.out_dir().join("genesis_local.json").exists());
    assert!(!staking.out_dir().join("bootstrappers.json").exists());
}

#[tokio::test]
async fn test_node_id_defaults_to_primary_pair() {
    let staking = StakingDir::new();
    let expected = staking.add_slot(0, 5);
    let dir = staking.path().to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["genesis-provision", "node-id", "--staking-dir", &dir]).unwrap();
    let mut config = staking.config();
    cli.apply(&mut config);
    let key = cli.key_material(&config).unwrap();

    let pipeline = Pipeline::new(config);
    assert_eq!(pipeline.resolve_node_id(&key).await.unwrap(), expected);
}

#[tokio::test]
async fn test_node_id_single_pair() {
    let staking = StakingDir::new();
    let expected = staking.add_slot(2, 9);

    let pipeline = Pipeline::new(staking.config());
    let key = KeyMaterial::new(
        staking.path().join("staker-2.key"),
        staking.path().join("staker-2.crt"),
    );
    assert_eq!(pipeline.resolve_node_id(&key).await.unwrap(), expected);

    // The single-pair mode never touches records.
    assert_eq!(staking.read_record(2)["id"], "");
}
