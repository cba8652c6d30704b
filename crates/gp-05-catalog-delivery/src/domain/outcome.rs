//! Delivery results.

use shared_types::ErrorKind;

use crate::domain::change_set::ChangeSetReceipt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The catalog accepted the change set.
    Submitted(ChangeSetReceipt),
    /// The catalog reports the product as locked. Not retried.
    Blocked { message: String },
    /// Release candidate tag; nothing submitted.
    SkippedPrerelease { tag: String },
}

impl DeliveryOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, DeliveryOutcome::Blocked { .. })
    }

    /// Taxonomy class when the outcome should be surfaced as a failure.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            DeliveryOutcome::Blocked { .. } => Some(ErrorKind::ExternalServiceBlocked),
            _ => None,
        }
    }
}
