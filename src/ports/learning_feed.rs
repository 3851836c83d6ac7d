//! Learning feed port - outbound delta history.
//!
//! The core only produces predicted-vs-actual delta reports; aggregating
//! them across decisions and biasing future verdicts is the learning
//! collaborator's job. Publishing is best-effort from the caller's view:
//! handlers log failures and never fail the user operation over them.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::outcome::DeltaReport;

/// Port for publishing delta history to the learning collaborator.
#[async_trait]
pub trait LearningFeed: Send + Sync {
    /// Publishes one decision's current delta report.
    async fn publish(&self, report: &DeltaReport) -> Result<(), DomainError>;
}
