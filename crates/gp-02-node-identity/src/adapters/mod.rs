//! # Adapters

pub mod subprocess;
