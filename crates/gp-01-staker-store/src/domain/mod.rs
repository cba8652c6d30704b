//! # Domain Layer
//!
//! - `record` - `StakerRecord`, `RecordPatch`, `KeyMaterial`
//! - `errors` - `StoreError`

pub mod errors;
pub mod record;
