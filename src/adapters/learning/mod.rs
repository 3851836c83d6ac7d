//! Learning feed adapters.

mod in_memory;

pub use in_memory::InMemoryLearningFeed;
