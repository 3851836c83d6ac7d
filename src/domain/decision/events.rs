//! Status events - append-only audit trail of lifecycle changes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::DecisionStatus;

/// One entry in a decision's status audit trail.
///
/// Every status change appends exactly one event; events are never mutated
/// or removed. A rollback on a completed decision is recorded as an event
/// with `rollback_at` set while the status itself stays `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: DecisionStatus,
    pub reason: String,
    pub actor: UserId,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implemented_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_at: Option<Timestamp>,
}

impl StatusEvent {
    /// Creates an event for a status change.
    pub fn new(status: DecisionStatus, reason: impl Into<String>, actor: UserId) -> Self {
        Self {
            status,
            reason: reason.into(),
            actor,
            timestamp: Timestamp::now(),
            implemented_at: None,
            rollback_at: None,
        }
    }

    /// Attaches the implementation date.
    pub fn with_implemented_at(mut self, at: Timestamp) -> Self {
        self.implemented_at = Some(at);
        self
    }

    /// Marks this event as a rollback record.
    pub fn with_rollback_at(mut self, at: Timestamp) -> Self {
        self.rollback_at = Some(at);
        self
    }

    /// True when this event records a rollback.
    pub fn is_rollback(&self) -> bool {
        self.rollback_at.is_some()
    }
}
