//! In-memory persistence adapters.

mod decision_repository;

pub use decision_repository::InMemoryDecisionRepository;
