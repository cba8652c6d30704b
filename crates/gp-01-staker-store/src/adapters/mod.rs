//! # Adapters
//!
//! - `json_dir` - Staking-directory store (production)
//! - `memory` - In-memory store (tests, dry runs)
//! - `lock` - Process-level directory lock
//! - `atomic` - Whole-file atomic replacement

pub mod atomic;
pub mod json_dir;
pub mod lock;
pub mod memory;
