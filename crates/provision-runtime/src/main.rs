//! # Genesis Provisioning Runtime
//!
//! Entry point for `genesis-provision`.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line
//! 2. Initialise tracing (`RUST_LOG`, default `info`)
//! 3. Load configuration: defaults → `--config` TOML → `GP_*` env → flags
//! 4. Run the requested stage on a current-thread runtime
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | I/O failure |
//! | 2 | missing input |
//! | 3 | resolution failure |
//! | 4 | invariant violation |

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gp_02_node_identity::SlotOutcome;
use shared_crypto::BlsSigner;
use shared_types::Classify;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use provision_runtime::cli::with_hex_prefix;
use provision_runtime::{Cli, Command, Pipeline, PipelineError, ProvisionConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.prints_document()) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e
                .downcast_ref::<PipelineError>()
                .map(|p| p.kind().exit_code())
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    if to_stderr {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ProvisionConfig> {
    let mut config = match &cli.config {
        Some(path) => ProvisionConfig::load(path).map_err(PipelineError::from)?,
        None => ProvisionConfig::default(),
    };
    config.apply_env().map_err(PipelineError::from)?;
    cli.apply(&mut config);
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).context("loading configuration")?;
    info!(
        "[gp-runtime] staking dir {}, network {}",
        config.staking.dir.display(),
        config.genesis.network
    );
    let node_key = cli.key_material(&config);
    let pipeline = Pipeline::new(config);

    match cli.command {
        Command::NodeId { .. } => {
            let key = node_key.context("node-id needs a key pair")?;
            let id = pipeline
                .resolve_node_id(&key)
                .await
                .with_context(|| format!("resolving identity of {}", key.key_path.display()))?;
            println!("NodeID: {}", id);
        }

        Command::ResolveIds { reprovision } => {
            let report = pipeline
                .resolve_ids(reprovision)
                .await
                .context("resolving staker identities")?;
            for (slot, outcome) in &report.outcomes {
                if let SlotOutcome::Failed(reason) = outcome {
                    warn!("[gp-runtime] slot {} unresolved: {}", slot, reason);
                }
            }
        }

        Command::Genesis { .. } => {
            let path = pipeline.write_genesis().context("building genesis")?;
            info!("[gp-runtime] genesis written to {}", path.display());
        }

        Command::SingleNodeGenesis {
            node_id,
            bls_public_key,
            bls_proof,
        } => {
            let signer = BlsSigner::from_hex(
                &with_hex_prefix(&bls_public_key),
                &with_hex_prefix(&bls_proof),
            )
            .map_err(|e| PipelineError::InvalidInput(e.to_string()))
            .context("parsing BLS signer")?;
            let document = pipeline
                .single_node_genesis(node_id, signer)
                .context("building single-node genesis")?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        Command::Bootstrappers { out_file, .. } => {
            let (path, _) = pipeline
                .write_bootstrappers(out_file.as_deref())
                .context("building bootstrap registry")?;
            info!("[gp-runtime] bootstrap registry written to {}", path.display());
        }

        Command::Provision { reprovision, .. } => {
            let summary = pipeline
                .provision(reprovision)
                .await
                .context("provisioning")?;
            info!(
                "[gp-runtime] {} resolved, {} already resolved, {} skipped, {} failed; {} validator(s) in genesis",
                summary.report.resolved(),
                summary.report.already_resolved(),
                summary.report.skipped(),
                summary.report.failed(),
                summary.validators.len()
            );
        }
    }

    Ok(())
}
