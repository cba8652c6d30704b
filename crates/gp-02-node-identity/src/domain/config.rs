//! Resolver configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// How the node binary is launched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Node executable. A bare name is looked up on `PATH`.
    pub node_binary: PathBuf,
    /// Appended after the staking flags.
    pub extra_args: Vec<String>,
    /// Per-slot deadline, in seconds.
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            node_binary: PathBuf::from("luxd"),
            extra_args: Vec::new(),
            timeout_secs: 30,
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
