//! Batch resolution results.

use shared_types::{ErrorKind, NodeId, SlotIndex};

/// What happened to one slot during a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Identity resolved and written to the record.
    Resolved(NodeId),
    /// Record already carried an identity; left untouched.
    AlreadyResolved,
    /// Key material missing.
    Skipped(String),
    /// Resolution failed; the record was not modified.
    Failed(String),
}

impl SlotOutcome {
    /// Error class of an unsuccessful outcome.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SlotOutcome::Resolved(_) | SlotOutcome::AlreadyResolved => None,
            SlotOutcome::Skipped(_) => Some(ErrorKind::MissingInput),
            SlotOutcome::Failed(_) => Some(ErrorKind::ResolutionFailure),
        }
    }
}

/// Per-slot outcomes of `IdentityProvisioner::resolve_all`, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub outcomes: Vec<(SlotIndex, SlotOutcome)>,
}

impl ResolutionReport {
    pub fn push(&mut self, slot: SlotIndex, outcome: SlotOutcome) {
        self.outcomes.push((slot, outcome));
    }

    pub fn resolved(&self) -> usize {
        self.count(|o| matches!(o, SlotOutcome::Resolved(_)))
    }

    pub fn already_resolved(&self) -> usize {
        self.count(|o| matches!(o, SlotOutcome::AlreadyResolved))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, SlotOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SlotOutcome::Failed(_)))
    }

    /// Outcome for a given slot, if it was visited.
    pub fn outcome(&self, slot: SlotIndex) -> Option<&SlotOutcome> {
        self.outcomes
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&SlotOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}
