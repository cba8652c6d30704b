//! # Error Taxonomy
//!
//! Defines the error classes shared across the provisioning crates.
//!
//! Each crate keeps its own `thiserror` enum; this module only fixes how
//! those errors are classified so the runtime can decide whether a failure
//! skips a slot or aborts the run.

use std::fmt;

/// Classification of a provisioning failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required record or key file does not exist.
    ///
    /// Non-fatal at slot level (skip with warning); fatal at document level
    /// when it leaves zero eligible stakers.
    MissingInput,
    /// The identity resolution subprocess produced no matching output
    /// before exit or timeout. Fatal for that slot only.
    ResolutionFailure,
    /// Duplicate identity, malformed amount/timestamp/address, or any other
    /// cross-record inconsistency. Aborts document assembly before any write.
    InvariantViolation,
    /// The external catalog reports the distribution target is locked.
    /// Surfaced verbatim, never retried automatically.
    ExternalServiceBlocked,
    /// Filesystem or process I/O failure outside the categories above.
    Io,
}

impl ErrorKind {
    /// Whether this class of failure should stop the whole run.
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, ErrorKind::InvariantViolation | ErrorKind::Io)
    }

    /// Process exit code used by the command-line tools.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::MissingInput => 2,
            ErrorKind::ResolutionFailure => 3,
            ErrorKind::InvariantViolation => 4,
            ErrorKind::ExternalServiceBlocked => 5,
            ErrorKind::Io => 1,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingInput => "missing input",
            ErrorKind::ResolutionFailure => "resolution failure",
            ErrorKind::InvariantViolation => "invariant violation",
            ErrorKind::ExternalServiceBlocked => "external service blocked",
            ErrorKind::Io => "i/o failure",
        };
        f.write_str(name)
    }
}

/// Implemented by every crate-level error type.
pub trait Classify {
    /// The taxonomy class of this error.
    fn kind(&self) -> ErrorKind;
}
