//! Outcome module - measured results and predicted-vs-actual deltas.

mod delta;
mod kpi;
mod outcome;

pub use delta::{
    compute_deltas, predicted_envelope, ComparisonStatus, DeltaReport, EffectiveOutcome,
    ScenarioDelta,
};
pub use kpi::KpiKey;
pub use outcome::{KpiEntry, Outcome, OutcomePatch, OutcomeStatus};
