//! Decision repository port (write side).
//!
//! Document-store contract keyed by decision id. The decision aggregate is
//! the unit of consistency, so updates are atomic compare-and-swap against
//! the revision the caller loaded: two concurrent "append version N+1"
//! writes cannot both succeed, which protects the exactly-one-entry-per-
//! version-number invariant.

use async_trait::async_trait;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, UserId};

/// Repository port for Decision aggregate persistence.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Persists a new decision.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if a decision with this id already exists
    /// - `InternalError` on infrastructure failure
    async fn save(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Replaces a stored decision if its revision still matches.
    ///
    /// `expected_revision` is the revision the caller loaded before
    /// mutating. On a lost race the caller should retry the whole
    /// operation, not just the write.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    /// - `ConcurrencyConflict` if the stored revision moved on
    async fn update(&self, decision: &Decision, expected_revision: u64)
        -> Result<(), DomainError>;

    /// Finds a decision by its id.
    ///
    /// Returns soft-deleted decisions too; callers decide whether a
    /// tombstone counts as found. Implementations verify aggregate
    /// invariants on read and surface violations loudly.
    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError>;

    /// Checks if a decision exists.
    async fn exists(&self, id: &DecisionId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Finds all decisions owned by a user, tombstones excluded.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Decision>, DomainError>;
}
