//! # Genesis Provisioning Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs          # staking directories, fake node binaries
//!     ├── e2e_provisioning.rs  # resolve → genesis → bootstrappers
//!     ├── flows.rs             # cross-crate invariants
//!     └── catalog.rs           # delivery submission against a mock catalog
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gp-tests
//! cargo test -p gp-tests integration::e2e_provisioning::
//! ```
//!
//! The end-to-end tests spawn `/bin/sh` scripts and only run on unix.

#![allow(dead_code)]

pub mod integration;
