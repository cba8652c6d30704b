//! # Adapters

pub mod writer;
