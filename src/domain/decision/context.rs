//! Decision context with per-field provenance.
//!
//! Every resolvable context attribute records whether it was explicitly
//! supplied, inferred, or defaulted, so verdict generation downstream can
//! tell facts from guesses.

use serde::{Deserialize, Serialize};

/// Where a context field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Explicitly supplied by the user.
    User,
    /// Guessed by the inference collaborator.
    Inferred,
    /// Product default, nothing known.
    Default,
}

/// A context attribute plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextField<T> {
    pub value: Option<T>,
    pub source: FieldSource,
}

impl<T> ContextField<T> {
    /// A user-supplied value.
    pub fn user(value: T) -> Self {
        Self {
            value: Some(value),
            source: FieldSource::User,
        }
    }

    /// An inferred value.
    pub fn inferred(value: T) -> Self {
        Self {
            value: Some(value),
            source: FieldSource::Inferred,
        }
    }

    /// An unresolved field.
    pub fn unresolved() -> Self {
        Self {
            value: None,
            source: FieldSource::Default,
        }
    }

    /// True when the field carries a value.
    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// True when the value was explicitly supplied rather than guessed.
    pub fn is_user_supplied(&self) -> bool {
        self.source == FieldSource::User && self.value.is_some()
    }
}

impl<T> Default for ContextField<T> {
    fn default() -> Self {
        Self::unresolved()
    }
}

/// The resolved business situation a verdict is generated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub company_stage: ContextField<String>,
    pub business_model: ContextField<String>,
    pub primary_kpi: ContextField<String>,
    pub market_type: ContextField<String>,
    pub market_segment: ContextField<String>,
}

impl DecisionContext {
    /// A fully unresolved context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Count of resolved fields, for display and comparison views.
    pub fn resolved_count(&self) -> usize {
        [
            self.company_stage.is_resolved(),
            self.business_model.is_resolved(),
            self.primary_kpi.is_resolved(),
            self.market_type.is_resolved(),
            self.market_segment.is_resolved(),
        ]
        .iter()
        .filter(|resolved| **resolved)
        .count()
    }
}
