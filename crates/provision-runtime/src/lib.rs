//! # Provision Runtime Library
//!
//! Exposes configuration loading and pipeline wiring for the
//! `genesis-provision` binary and the integration tests.
//!
//! - `config` - layered `ProvisionConfig` (defaults, TOML, `GP_*` env)
//! - `pipeline` - stage wiring over the staking directory
//! - `cli` - clap definitions and flag overrides

pub mod cli;
pub mod config;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::{ConfigError, ProvisionConfig, SingleNodeConfig, StakingConfig};
pub use pipeline::{Pipeline, PipelineError, ProvisionSummary};
