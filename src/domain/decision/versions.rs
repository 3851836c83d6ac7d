//! Version entries for the two append-only streams on a decision.
//!
//! Context and verdict evolve for different reasons and at different rates,
//! so each has its own 1-indexed, monotonically increasing stream. Entries
//! are only ever appended, never rewritten.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{DecisionContext, ModelMeta, Verdict};

/// One snapshot in the context version stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextVersion {
    pub version: u32,
    pub context: DecisionContext,
    pub reason: String,
    pub created_at: Timestamp,
}

impl ContextVersion {
    /// Creates a version entry.
    pub fn new(version: u32, context: DecisionContext, reason: impl Into<String>) -> Self {
        Self {
            version,
            context,
            reason: reason.into(),
            created_at: Timestamp::now(),
        }
    }
}

/// One snapshot in the verdict version stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictVersion {
    pub version: u32,
    pub verdict: Verdict,
    pub model_meta: ModelMeta,
    pub created_at: Timestamp,
}

impl VerdictVersion {
    /// Creates a version entry.
    pub fn new(version: u32, verdict: Verdict, model_meta: ModelMeta) -> Self {
        Self {
            version,
            verdict,
            model_meta,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_version_carries_snapshot_and_reason() {
        let v = ContextVersion::new(1, DecisionContext::empty(), "initial");
        assert_eq!(v.version, 1);
        assert_eq!(v.reason, "initial");
        assert_eq!(v.context, DecisionContext::empty());
    }
}
