//! In-memory record store.
//!
//! Same patch semantics as the directory store, no filesystem.

use std::collections::BTreeMap;
use std::path::PathBuf;

use shared_types::SlotIndex;

use crate::domain::errors::StoreError;
use crate::domain::record::{KeyMaterial, RecordPatch, StakerRecord};
use crate::ports::StakerStore;

#[derive(Debug, Default, Clone)]
pub struct InMemoryStakerStore {
    records: BTreeMap<SlotIndex, StakerRecord>,
    keys: BTreeMap<SlotIndex, KeyMaterial>,
}

impl InMemoryStakerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot, replacing any existing record.
    pub fn insert(&mut self, slot: SlotIndex, record: StakerRecord) {
        self.records.insert(slot, record);
    }

    /// Register key material for a slot.
    pub fn insert_key_material(&mut self, slot: SlotIndex, material: KeyMaterial) {
        self.keys.insert(slot, material);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn virtual_path(slot: SlotIndex) -> PathBuf {
    PathBuf::from(format!("memory://staker-{}", slot))
}

impl StakerStore for InMemoryStakerStore {
    fn read(&self, slot: SlotIndex) -> Result<StakerRecord, StoreError> {
        self.records
            .get(&slot)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                slot,
                path: virtual_path(slot),
            })
    }

    fn write(&mut self, slot: SlotIndex, patch: &RecordPatch) -> Result<StakerRecord, StoreError> {
        let record = self
            .records
            .get_mut(&slot)
            .ok_or_else(|| StoreError::NotFound {
                slot,
                path: virtual_path(slot),
            })?;
        record.apply(patch)?;
        Ok(record.clone())
    }

    fn key_material(&self, slot: SlotIndex) -> Result<KeyMaterial, StoreError> {
        self.keys
            .get(&slot)
            .cloned()
            .ok_or_else(|| StoreError::KeyMaterialMissing {
                slot,
                path: virtual_path(slot),
            })
    }

    fn scan(&self) -> Result<Vec<(SlotIndex, StakerRecord)>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|(slot, record)| (*slot, record.clone()))
            .collect())
    }
}
