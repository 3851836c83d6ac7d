//! In-memory decision repository for testing and single-process use.
//!
//! Implements the document-store contract over a HashMap, including the
//! optimistic revision check. Aggregate invariants are verified on every
//! read so corruption is surfaced loudly instead of propagating.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, UserId};
use crate::ports::DecisionRepository;

/// In-memory repository for Decision aggregates.
#[derive(Debug, Default)]
pub struct InMemoryDecisionRepository {
    decisions: RwLock<HashMap<DecisionId, Decision>>,
}

impl InMemoryDecisionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decisions, tombstones included.
    pub async fn len(&self) -> usize {
        self.decisions.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.decisions.read().await.is_empty()
    }
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn save(&self, decision: &Decision) -> Result<(), DomainError> {
        let mut decisions = self.decisions.write().await;
        if decisions.contains_key(decision.id()) {
            return Err(DomainError::conflict("Decision already exists")
                .with_detail("decision_id", decision.id().to_string()));
        }
        decisions.insert(*decision.id(), decision.clone());
        Ok(())
    }

    async fn update(
        &self,
        decision: &Decision,
        expected_revision: u64,
    ) -> Result<(), DomainError> {
        let mut decisions = self.decisions.write().await;
        let stored = decisions
            .get(decision.id())
            .ok_or_else(|| DomainError::decision_not_found(decision.id()))?;

        if stored.revision() != expected_revision {
            return Err(DomainError::conflict(format!(
                "Decision was modified concurrently (stored revision {}, expected {})",
                stored.revision(),
                expected_revision
            ))
            .with_detail("decision_id", decision.id().to_string()));
        }

        decisions.insert(*decision.id(), decision.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        let decisions = self.decisions.read().await;
        match decisions.get(id) {
            Some(decision) => {
                decision.check_invariants()?;
                Ok(Some(decision.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Decision>, DomainError> {
        let decisions = self.decisions.read().await;
        let mut owned: Vec<Decision> = decisions
            .values()
            .filter(|d| d.owner() == owner && !d.is_deleted())
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }
}
