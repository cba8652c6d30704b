//! # Adapters

pub mod file;
