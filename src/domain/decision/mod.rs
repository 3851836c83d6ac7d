//! Decision module - the versioned, auditable pricing decision aggregate.

mod aggregate;
mod comparison;
mod context;
mod events;
mod status;
mod verdict;
mod versions;

pub use aggregate::{Decision, ExpectedImpact, MAX_COMPANY_NAME_LENGTH};
pub use comparison::{ComparisonItem, ComparisonView};
pub use context::{ContextField, DecisionContext, FieldSource};
pub use events::StatusEvent;
pub use status::DecisionStatus;
pub use verdict::{
    ConfidenceLabel, ModelMeta, RiskLabel, RiskOutlook, SupportingDetails, Verdict,
};
pub use versions::{ContextVersion, VerdictVersion};
