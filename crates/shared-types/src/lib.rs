//! # Shared Types Crate
//!
//! This crate contains the identity and address types that every stage of
//! the provisioning pipeline agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `NodeId`, `ChainAddress`, `ExecutionAddress`
//!   and `SlotIndex` are defined once and shared by the store, the resolver
//!   and both document builders.
//! - **Parse, don't validate**: a `NodeId` or `ChainAddress` value can only
//!   exist if its textual form checksums correctly.
//! - **One error taxonomy**: every crate error classifies into an
//!   [`ErrorKind`] so the runtime can apply a single propagation policy.

pub mod address;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod node_id;

pub use address::{AddressError, ChainAddress, ExecutionAddress};
pub use entities::{NetworkName, SlotIndex, MAX_SLOTS};
pub use errors::{Classify, ErrorKind};
pub use node_id::{NodeId, NodeIdError, NODE_ID_PREFIX};
