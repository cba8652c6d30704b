//! # Bootstrap Registry Builder (gp-04)
//!
//! New nodes join a network by dialing the peers listed in
//! `bootstrappers.json`:
//!
//! ```json
//! {
//!   "local":   [ ... untouched ... ],
//!   "mainnet": [ { "id": "NodeID-…", "ip": "127.0.0.1:9651" }, ... ],
//!   "testnet": [ { "id": "NodeID-…", "ip": "127.0.0.1:9651" }, ... ]
//! }
//! ```
//!
//! The target networks are rebuilt in full from the staker records on every
//! run; any other network already in the file is carried over verbatim.
//! Keys are emitted sorted, so identical input produces identical bytes.
//!
//! ## Peer Addresses
//!
//! A slot's address is its configured override, otherwise
//! `<host>:<base_port + 2 * slot>` (default `127.0.0.1:9651` for slot 0).

pub mod adapters;
pub mod domain;
pub mod service;

pub use adapters::file::RegistryFile;
pub use domain::config::RegistryConfig;
pub use domain::entities::{BootstrapEntry, BootstrapRegistry};
pub use domain::errors::RegistryError;
pub use service::BootstrapRegistryBuilder;
