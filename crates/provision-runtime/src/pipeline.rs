//! # Provisioning Pipeline
//!
//! Wires the stage crates together for one run.
//!
//! ```text
//! staking dir ──resolve_ids──→ staking dir (ids patched)
//!      │
//!      ├──write_genesis──────→ <out>/genesis_<network>.json
//!      └──write_bootstrappers→ <out>/bootstrappers.json
//! ```
//!
//! Resolution takes the directory lock for its whole pass. The document
//! stages open the store read-only and never modify records.
//!
//! A record still lacking an identity when the documents are built is
//! excluded with a warning, unless its slot failed in a way that is fatal for
//! the run. The documents are refused only when no record remains.

use std::path::{Path, PathBuf};

use gp_01_staker_store::{JsonDirectoryStore, KeyMaterial, StakerRecord, StakerStore, StoreError};
use gp_02_node_identity::{
    IdentityProvisioner, IdentityResolver, ResolutionReport, ResolveError, SlotOutcome,
    SubprocessResolver,
};
use gp_03_genesis_builder::{
    GenesisBuilder, GenesisConfig, GenesisDocument, GenesisError, GenesisWriter, SingleNodeInput,
};
use gp_04_bootstrap_registry::{
    BootstrapRegistry, BootstrapRegistryBuilder, RegistryError, RegistryFile,
};
use shared_crypto::BlsSigner;
use shared_types::{Classify, ErrorKind, NodeId, SlotIndex};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, ProvisionConfig};

/// Any failure of a pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Command-line input that does not describe a valid validator.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Classify for PipelineError {
    fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Config(_) | PipelineError::InvalidInput(_) => {
                ErrorKind::InvariantViolation
            }
            PipelineError::Store(e) => e.kind(),
            PipelineError::Resolve(e) => e.kind(),
            PipelineError::Genesis(e) => e.kind(),
            PipelineError::Registry(e) => e.kind(),
        }
    }
}

/// Files produced by a full provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionSummary {
    pub report: ResolutionReport,
    /// Slots that made it into both documents.
    pub validators: Vec<SlotIndex>,
    pub genesis_path: PathBuf,
    pub registry_path: PathBuf,
}

/// One configured provisioning run.
pub struct Pipeline<R: IdentityResolver = SubprocessResolver> {
    config: ProvisionConfig,
    resolver: R,
}

impl Pipeline<SubprocessResolver> {
    /// Pipeline that resolves identities with the configured node binary.
    pub fn new(config: ProvisionConfig) -> Self {
        let resolver = SubprocessResolver::new(config.resolver.clone());
        Self { config, resolver }
    }
}

impl<R: IdentityResolver> Pipeline<R> {
    pub fn with_resolver(config: ProvisionConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Resolve one explicit key/certificate pair.
    pub async fn resolve_node_id(&self, key: &KeyMaterial) -> Result<NodeId, PipelineError> {
        Ok(self.resolver.resolve(key).await?)
    }

    /// Fill in the identity of every present slot that lacks one.
    pub async fn resolve_ids(&self, reprovision: bool) -> Result<ResolutionReport, PipelineError> {
        let mut store = JsonDirectoryStore::open(&self.config.staking.dir)?;
        let provisioner = IdentityProvisioner::new(&self.resolver).with_reprovision(reprovision);
        Ok(provisioner.resolve_all(&mut store).await?)
    }

    /// Every present record, in slot order.
    pub fn records(&self) -> Result<Vec<(SlotIndex, StakerRecord)>, PipelineError> {
        let store = JsonDirectoryStore::open_read_only(&self.config.staking.dir)?;
        Ok(store.scan()?)
    }

    /// Records that go into the documents, in slot order.
    ///
    /// `report` classifies unresolved slots from a preceding resolution
    /// pass; without one an unresolved record counts as missing input.
    pub fn eligible_records(
        &self,
        report: Option<&ResolutionReport>,
    ) -> Result<Vec<(SlotIndex, StakerRecord)>, PipelineError> {
        let mut eligible = Vec::new();
        for (slot, record) in self.records()? {
            if record.is_resolved() {
                eligible.push((slot, record));
                continue;
            }

            let kind = report
                .and_then(|r| r.outcome(slot))
                .and_then(SlotOutcome::error_kind)
                .unwrap_or(ErrorKind::MissingInput);
            if kind.is_fatal_for_run() {
                return Err(GenesisError::Unresolved { slot }.into());
            }
            warn!(
                "[gp-runtime] slot {} has no node identity ({}), excluded from genesis and bootstrappers",
                slot, kind
            );
        }
        Ok(eligible)
    }

    /// Build the network genesis from the staking directory.
    pub fn build_genesis(&self) -> Result<GenesisDocument, PipelineError> {
        let records = self.eligible_records(None)?;
        self.genesis_from(&records)
    }

    /// Build and atomically write `genesis_<network>.json`.
    pub fn write_genesis(&self) -> Result<PathBuf, PipelineError> {
        let records = self.eligible_records(None)?;
        self.write_genesis_from(&records)
    }

    fn genesis_from(
        &self,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<GenesisDocument, PipelineError> {
        let builder = GenesisBuilder::new(self.config.genesis.clone());
        Ok(builder.build(records)?)
    }

    fn write_genesis_from(
        &self,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<PathBuf, PipelineError> {
        let document = self.genesis_from(records)?;
        let writer = GenesisWriter::new(&self.config.staking.out_dir);
        Ok(writer.write(&document, self.config.genesis.network)?)
    }

    /// One-validator genesis from an explicit identity and BLS signer.
    ///
    /// Uses the single-node network parameters; only the reward address
    /// and start time are taken from the configured genesis section. The
    /// reward address defaults to the allocation address itself.
    pub fn single_node_genesis(
        &self,
        node_id: NodeId,
        signer: BlsSigner,
    ) -> Result<GenesisDocument, PipelineError> {
        let single = &self.config.single_node;
        let chain_address = single
            .chain_address()
            .map_err(|e| PipelineError::InvalidInput(e.to_string()))?;

        let mut genesis = GenesisConfig::single_node();
        genesis.reward_address = Some(
            self.config
                .genesis
                .reward_address
                .clone()
                .unwrap_or_else(|| chain_address.clone()),
        );
        genesis.start_time = self.config.genesis.start_time;
        genesis.verify_signers = self.config.genesis.verify_signers;

        let input = SingleNodeInput {
            node_id,
            signer,
            chain_address,
            eth_address: single.eth_address(),
        };
        Ok(GenesisBuilder::new(genesis).build_single_node(&input)?)
    }

    /// Rebuild the managed networks of the bootstrap registry file.
    pub fn write_bootstrappers(
        &self,
        out_file: Option<&Path>,
    ) -> Result<(PathBuf, BootstrapRegistry), PipelineError> {
        let records = self.eligible_records(None)?;
        self.write_bootstrappers_from(out_file, &records)
    }

    fn write_bootstrappers_from(
        &self,
        out_file: Option<&Path>,
        records: &[(SlotIndex, StakerRecord)],
    ) -> Result<(PathBuf, BootstrapRegistry), PipelineError> {
        let file = match out_file {
            Some(path) => RegistryFile::new(path),
            None => RegistryFile::in_dir(&self.config.staking.out_dir),
        };
        let builder = BootstrapRegistryBuilder::new(self.config.registry.clone());
        let registry = builder.write(&file, records)?;
        Ok((file.path().to_path_buf(), registry))
    }

    /// resolve-ids → genesis → bootstrappers.
    ///
    /// Both documents are built from the same set of eligible records.
    pub async fn provision(&self, reprovision: bool) -> Result<ProvisionSummary, PipelineError> {
        let report = self.resolve_ids(reprovision).await?;
        let records = self.eligible_records(Some(&report))?;
        let genesis_path = self.write_genesis_from(&records)?;
        let (registry_path, _) = self.write_bootstrappers_from(None, &records)?;

        let validators: Vec<SlotIndex> = records.iter().map(|(slot, _)| *slot).collect();
        info!(
            "[gp-runtime] provisioned {} validator(s), {} slot(s) excluded: {}, {}",
            validators.len(),
            report.outcomes.len().saturating_sub(validators.len()),
            genesis_path.display(),
            registry_path.display()
        );
        Ok(ProvisionSummary {
            report,
            validators,
            genesis_path,
            registry_path,
        })
    }
}
