//! # Node Identity Resolution (gp-02)
//!
//! A validator's node identity is derived by the node software from its TLS
//! staking credentials. This crate obtains it by launching the node binary
//! against a key/cert pair and watching its log output.
//!
//! ## Resolution Flow
//!
//! ```text
//! KeyMaterial ──→ spawn <node> --staking-tls-key-file K --staking-tls-cert-file C
//!                   │
//!                   ├─ stdout ─┐
//!                   └─ stderr ─┴──→ line stream ──→ match `"nodeID": "NodeID-…"`
//!                                                        │
//!                              first match ─→ kill + reap ─→ NodeId
//!                              stream end  ─→ NoIdentity
//!                              deadline    ─→ kill + reap ─→ Timeout
//! ```
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Line matcher, per-slot outcomes, errors, config
//! - `ports/` - `IdentityResolver` trait
//! - `adapters/` - `SubprocessResolver`
//! - `service.rs` - `IdentityProvisioner`, fills unresolved store slots

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::subprocess::SubprocessResolver;
pub use domain::config::ResolverConfig;
pub use domain::errors::ResolveError;
pub use domain::matcher::extract_node_id;
pub use domain::report::{ResolutionReport, SlotOutcome};
pub use ports::IdentityResolver;
pub use service::IdentityProvisioner;
