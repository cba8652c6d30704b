//! # Staker Record Store (gp-01)
//!
//! Owns the per-validator records in a staking directory and serializes all
//! access to them.
//!
//! ## Directory Layout
//!
//! ```text
//! <staking-dir>/
//!   .provision.lock          exclusive while a writer is open
//!   staker.json   .key .crt  slot 0 (primary validator)
//!   staker-1.json .key .crt  slot 1
//!   ...
//!   staker-99.json .key .crt slot 99
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Patch cannot create a slot | `write` fails with `NotFound` when the record file is absent |
//! | Resolved identity is stable | Changing a set `id` requires `reprovision` on the patch |
//! | No torn records | Every write goes through temp file + fsync + rename |
//! | Single writer | `fs2` exclusive lock held for the lifetime of a writable store |
//! | Foreign fields survive | Unknown JSON keys are round-tripped untouched |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Record, patch, key material and errors
//! - `ports/` - The `StakerStore` trait consumed by the resolver and builders
//! - `adapters/` - JSON directory store, in-memory store, lock, atomic writer

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::atomic::{write_atomic, write_json_atomic};
pub use adapters::json_dir::JsonDirectoryStore;
pub use adapters::lock::DirectoryLock;
pub use adapters::memory::InMemoryStakerStore;
pub use domain::errors::StoreError;
pub use domain::record::{KeyMaterial, RecordPatch, StakerRecord};
pub use ports::StakerStore;
