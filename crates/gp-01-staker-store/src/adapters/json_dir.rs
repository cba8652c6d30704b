//! Staking-directory backed record store.

use std::path::{Path, PathBuf};

use shared_types::SlotIndex;
use tracing::{debug, info};

use super::atomic::write_json_atomic;
use super::lock::DirectoryLock;
use crate::domain::errors::StoreError;
use crate::domain::record::{KeyMaterial, RecordPatch, StakerRecord};
use crate::ports::StakerStore;

/// Records stored as `staker[-n].json` next to their `.key`/`.crt` files.
#[derive(Debug)]
pub struct JsonDirectoryStore {
    dir: PathBuf,
    lock: Option<DirectoryLock>,
}

impl JsonDirectoryStore {
    /// Open for reading and writing, taking the directory lock.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = Self::existing_dir(dir.into())?;
        let lock = DirectoryLock::acquire(&dir)?;
        info!("[gp-01] opened staking directory {} (pid {})", dir.display(), lock.pid());
        Ok(Self {
            dir,
            lock: Some(lock),
        })
    }

    /// Open for reading only. No lock is taken.
    pub fn open_read_only(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = Self::existing_dir(dir.into())?;
        debug!("[gp-01] opened staking directory {} read-only", dir.display());
        Ok(Self { dir, lock: None })
    }

    fn existing_dir(dir: PathBuf) -> Result<PathBuf, StoreError> {
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(StoreError::DirectoryMissing(dir))
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_writable(&self) -> bool {
        self.lock.is_some()
    }

    /// `staker` for slot 0, `staker-n` otherwise.
    pub fn file_stem(slot: SlotIndex) -> String {
        if slot.is_primary() {
            "staker".to_string()
        } else {
            format!("staker-{}", slot.get())
        }
    }

    pub fn record_path(&self, slot: SlotIndex) -> PathBuf {
        self.dir.join(format!("{}.json", Self::file_stem(slot)))
    }

    pub fn key_path(&self, slot: SlotIndex) -> PathBuf {
        self.dir.join(format!("{}.key", Self::file_stem(slot)))
    }

    pub fn cert_path(&self, slot: SlotIndex) -> PathBuf {
        self.dir.join(format!("{}.crt", Self::file_stem(slot)))
    }
}

impl StakerStore for JsonDirectoryStore {
    fn read(&self, slot: SlotIndex) -> Result<StakerRecord, StoreError> {
        let path = self.record_path(slot);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { slot, path });
            }
            Err(e) => return Err(StoreError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
            path,
            reason: e.to_string(),
        })
    }

    fn write(&mut self, slot: SlotIndex, patch: &RecordPatch) -> Result<StakerRecord, StoreError> {
        if self.lock.is_none() {
            return Err(StoreError::ReadOnly);
        }

        let mut record = self.read(slot)?;
        record.apply(patch)?;

        let path = self.record_path(slot);
        write_json_atomic(&path, &record).map_err(|e| StoreError::io(&path, e))?;
        debug!("[gp-01] slot {} written to {}", slot, path.display());
        Ok(record)
    }

    fn key_material(&self, slot: SlotIndex) -> Result<KeyMaterial, StoreError> {
        let material = KeyMaterial::new(self.key_path(slot), self.cert_path(slot));
        for path in [&material.key_path, &material.cert_path] {
            if !path.is_file() {
                return Err(StoreError::KeyMaterialMissing {
                    slot,
                    path: path.clone(),
                });
            }
        }
        Ok(material)
    }
}
