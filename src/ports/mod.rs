//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod decision_repository;
mod inference;
mod learning_feed;
mod usage_gate;

pub use decision_repository::DecisionRepository;
pub use inference::{InferenceError, InferenceProvider, NarrativeRequest, VerdictDraft};
pub use learning_feed::LearningFeed;
pub use usage_gate::{LimitedAction, UsageGate};
