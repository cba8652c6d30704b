//! `bootstrappers.json` on disk.

use std::path::{Path, PathBuf};

use gp_01_staker_store::write_json_atomic;
use tracing::debug;

use crate::domain::entities::BootstrapRegistry;
use crate::domain::errors::RegistryError;

#[derive(Debug, Clone)]
pub struct RegistryFile {
    path: PathBuf,
}

impl RegistryFile {
    pub const FILE_NAME: &'static str = "bootstrappers.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `bootstrappers.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current registry; empty when the file does not exist yet.
    pub fn load(&self) -> Result<BootstrapRegistry, RegistryError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("[gp-04] no registry at {}, starting empty", self.path.display());
                return Ok(BootstrapRegistry::new());
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|e| RegistryError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Atomically replace the file.
    pub fn store(&self, registry: &BootstrapRegistry) -> Result<(), RegistryError> {
        write_json_atomic(&self.path, registry).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
