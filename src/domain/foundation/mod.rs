//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the PriceLens domain.

mod command;
mod currency;
mod errors;
mod ids;
mod score;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use currency::Currency;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DecisionId, ScenarioId, UserId};
pub use score::Score;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
