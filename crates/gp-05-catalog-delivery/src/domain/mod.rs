//! # Domain Layer

pub mod change_set;
pub mod errors;
pub mod outcome;
pub mod release;
pub mod template;
