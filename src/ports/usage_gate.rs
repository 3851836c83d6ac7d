//! Usage gate port - plan-limit pre-checks for mutating operations.
//!
//! The limits collaborator is consulted before every quota-bearing mutation.
//! A denial is a distinct, user-facing `LimitExceeded` error, not a system
//! fault.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, UserId};

/// Operations metered per user per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedAction {
    CreateDecision,
    GenerateScenarios,
    RegenerateVerdict,
}

impl LimitedAction {
    /// Stable identifier used for metering keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitedAction::CreateDecision => "create_decision",
            LimitedAction::GenerateScenarios => "generate_scenarios",
            LimitedAction::RegenerateVerdict => "regenerate_verdict",
        }
    }
}

impl fmt::Display for LimitedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the plan-limits collaborator.
#[async_trait]
pub trait UsageGate: Send + Sync {
    /// Checks the user's quota for an action, consuming one unit if allowed.
    ///
    /// # Errors
    ///
    /// - `LimitExceeded` when the user's plan quota is exhausted
    /// - `Dependency` when the limits collaborator itself fails
    async fn check(&self, user_id: &UserId, action: LimitedAction) -> Result<(), DomainError>;
}
