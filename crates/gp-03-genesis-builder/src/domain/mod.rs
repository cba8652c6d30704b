//! # Domain Layer
//!
//! - `network` - Built-in network presets
//! - `config` - Builder configuration
//! - `unlock` - Unlock schedule policies
//! - `document` - Genesis wire types
//! - `execution` - Execution-chain genesis
//! - `errors` - `GenesisError`

pub mod config;
pub mod document;
pub mod errors;
pub mod execution;
pub mod network;
pub mod unlock;
