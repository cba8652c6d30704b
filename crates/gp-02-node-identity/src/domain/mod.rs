//! # Domain Layer

pub mod config;
pub mod errors;
pub mod matcher;
pub mod report;
