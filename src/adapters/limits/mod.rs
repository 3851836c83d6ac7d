//! Usage limit adapters.

mod in_memory;

pub use in_memory::{InMemoryUsageGate, UsageLimits};
