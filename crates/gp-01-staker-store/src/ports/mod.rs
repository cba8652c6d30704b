//! # Ports Layer
//!
//! The record store is a driven port for every other stage of the pipeline.

use shared_types::SlotIndex;
use tracing::{debug, warn};

use crate::domain::errors::StoreError;
use crate::domain::record::{KeyMaterial, RecordPatch, StakerRecord};

/// Access to the staker records of one staking directory.
pub trait StakerStore {
    /// Read the record of a slot.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no record file for this slot
    /// - `Malformed`: the file is not a JSON object
    fn read(&self, slot: SlotIndex) -> Result<StakerRecord, StoreError>;

    /// Read-modify-write a slot and return the updated record.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: a patch never creates a slot
    /// - `IdentityConflict`: `id` already set to another value without `reprovision`
    /// - `ReadOnly`: the store was opened without the directory lock
    fn write(&mut self, slot: SlotIndex, patch: &RecordPatch) -> Result<StakerRecord, StoreError>;

    /// TLS key and certificate paths of a slot.
    ///
    /// ## Errors
    ///
    /// - `KeyMaterialMissing`: either file does not exist
    fn key_material(&self, slot: SlotIndex) -> Result<KeyMaterial, StoreError>;

    /// Every present record in slot order.
    ///
    /// Absent slots are skipped with a warning. Any other failure aborts
    /// the scan.
    fn scan(&self) -> Result<Vec<(SlotIndex, StakerRecord)>, StoreError> {
        let mut records = Vec::new();
        let mut absent = Vec::new();
        for slot in SlotIndex::all() {
            match self.read(slot) {
                Ok(record) => records.push((slot, record)),
                Err(StoreError::NotFound { .. }) => {
                    debug!("[gp-01] slot {} has no record, skipping", slot);
                    absent.push(slot);
                }
                Err(e) => return Err(e),
            }
        }
        if !absent.is_empty() {
            warn!(
                "[gp-01] skipped {} slot(s) without a record: {}",
                absent.len(),
                summarize_slots(&absent)
            );
        }
        Ok(records)
    }
}

/// Compact rendering of sorted slots, e.g. `1-3, 7, 9-99`.
pub fn summarize_slots(slots: &[SlotIndex]) -> String {
    let mut ranges: Vec<(u8, u8)> = Vec::new();
    for slot in slots {
        let n = slot.get();
        match ranges.last_mut() {
            Some((_, end)) if n == *end + 1 => *end = n,
            _ => ranges.push((n, n)),
        }
    }
    ranges
        .iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(indices: &[u8]) -> Vec<SlotIndex> {
        indices.iter().map(|i| SlotIndex::new(*i).unwrap()).collect()
    }

    #[test]
    fn test_summarize_slots() {
        assert_eq!(summarize_slots(&slots(&[])), "");
        assert_eq!(summarize_slots(&slots(&[4])), "4");
        assert_eq!(summarize_slots(&slots(&[1, 2, 3, 7, 9, 10])), "1-3, 7, 9-10");
        let all_but_zero: Vec<u8> = (1..100).collect();
        assert_eq!(summarize_slots(&slots(&all_but_zero)), "1-99");
    }
}
