//! Inference adapters.

mod mock;

pub use mock::MockInferenceProvider;
