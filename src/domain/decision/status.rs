//! Decision lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a pricing decision.
///
/// `pending -> approved -> completed`, with `pending -> rejected` terminal.
/// A completed decision can additionally receive rollback status events
/// without leaving `completed`; that legacy shape is preserved deliberately
/// (a distinct rolled-back state is a product decision, not an engineering
/// fix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl DecisionStatus {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "Pending",
            DecisionStatus::Approved => "Approved",
            DecisionStatus::Rejected => "Rejected",
            DecisionStatus::Completed => "Completed",
        }
    }

    /// True while outcomes may be recorded against the decision.
    pub fn allows_outcome_recording(&self) -> bool {
        matches!(self, DecisionStatus::Approved | DecisionStatus::Completed)
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl StateMachine for DecisionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DecisionStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected) | (Approved, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DecisionStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved => vec![Completed],
            Rejected => vec![],
            Completed => vec![],
        }
    }
}
