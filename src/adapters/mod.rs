//! Adapters - Implementations of ports for concrete backends.
//!
//! Only in-process implementations live here: an in-memory document store
//! with optimistic concurrency, a deterministic mock inference provider, a
//! fixed-window usage gate, and a recording learning feed. Network-backed
//! adapters (HTTP, database, live model providers) are wired by the hosting
//! application.

pub mod inference;
pub mod learning;
pub mod limits;
pub mod memory;

pub use inference::MockInferenceProvider;
pub use learning::InMemoryLearningFeed;
pub use limits::{InMemoryUsageGate, UsageLimits};
pub use memory::InMemoryDecisionRepository;
