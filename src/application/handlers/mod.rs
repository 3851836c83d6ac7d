//! Command and query handlers.
//!
//! One handler per operation, CQRS style: a command struct, a handler
//! holding its ports behind `Arc<dyn ...>`, and `handle(cmd, metadata)`.
//! Handlers are request-scoped and stateless between calls; the decision
//! aggregate is mutated in memory and committed with one optimistic
//! compare-and-swap against the revision that was loaded.

pub mod decision;
pub mod outcome;
pub mod scenario;

#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;
use std::time::Duration;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError};
use crate::ports::{DecisionRepository, InferenceError};

/// Loads a live decision; missing and soft-deleted ids both read as not
/// found through the operations surface.
pub(crate) async fn load_decision(
    repository: &dyn DecisionRepository,
    id: &DecisionId,
) -> Result<Decision, DomainError> {
    match repository.find_by_id(id).await? {
        Some(decision) if !decision.is_deleted() => Ok(decision),
        _ => Err(DomainError::decision_not_found(id)),
    }
}

/// Bounds an inference call.
///
/// A timeout surfaces as a `Dependency` error before any state is touched,
/// so the triggering operation never partially applies.
pub(crate) async fn with_inference_timeout<T, F>(
    timeout: Duration,
    future: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, InferenceError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result.map_err(DomainError::from),
        Err(_) => Err(DomainError::dependency(format!(
            "Inference collaborator timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}
