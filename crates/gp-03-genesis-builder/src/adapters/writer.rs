//! Genesis file output.

use std::path::{Path, PathBuf};

use gp_01_staker_store::write_json_atomic;
use shared_types::NetworkName;
use tracing::info;

use crate::domain::document::GenesisDocument;
use crate::domain::errors::GenesisError;

/// Writes `genesis_<network>.json` into an output directory.
#[derive(Debug, Clone)]
pub struct GenesisWriter {
    out_dir: PathBuf,
}

impl GenesisWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn path_for(&self, network: NetworkName) -> PathBuf {
        self.out_dir.join(format!("genesis_{}.json", network))
    }

    /// Atomically replace the network's genesis file.
    pub fn write(
        &self,
        document: &GenesisDocument,
        network: NetworkName,
    ) -> Result<PathBuf, GenesisError> {
        let path = self.path_for(network);
        write_json_atomic(&path, document).map_err(|source| GenesisError::Io {
            path: path.clone(),
            source,
        })?;
        info!(
            "[gp-03] wrote genesis for {} ({} stakers) to {}",
            network,
            document.initial_stakers.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
