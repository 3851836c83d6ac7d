//! Verdict - the AI-assisted recommendation with deterministic scoring.
//!
//! Confidence and risk labels are pure functions of their scores and are
//! computed on access, never stored, so they cannot drift from the scores
//! that derive them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Score, ValidationError};

/// Banded label for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl ConfidenceLabel {
    /// Derives the label from a score.
    pub fn from_score(score: Score) -> Self {
        let v = score.value();
        if v < 0.45 {
            ConfidenceLabel::Low
        } else if v < 0.75 {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::High
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLabel::Low => "Low",
            ConfidenceLabel::Medium => "Medium",
            ConfidenceLabel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Banded label for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    /// Derives the label from a score.
    pub fn from_score(score: Score) -> Self {
        let v = score.value();
        if v <= 0.33 {
            RiskLabel::Low
        } else if v <= 0.66 {
            RiskLabel::Medium
        } else {
            RiskLabel::High
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Medium => "Medium",
            RiskLabel::High => "High",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What to expect after acting on the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOutlook {
    pub risk_score: Score,
    pub description: String,
}

impl RiskOutlook {
    /// Label derived from the risk score.
    pub fn risk_label(&self) -> RiskLabel {
        RiskLabel::from_score(self.risk_score)
    }
}

/// Narrative supporting details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDetails {
    pub expected_revenue_impact: String,
    pub churn_outlook: String,
    pub market_positioning: String,
}

/// Which model produced a verdict and how long inference took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub model: String,
    pub prompt_version: String,
    pub inference_ms: u64,
}

/// AI narrative plus deterministic confidence/risk scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub headline: String,
    pub summary: String,
    pub confidence_score: Score,
    pub cta: String,
    pub why_this_decision: Vec<String>,
    pub what_to_expect: RiskOutlook,
    pub supporting_details: SupportingDetails,
}

impl Verdict {
    /// Creates a verdict, validating the headline is present.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        headline: String,
        summary: String,
        confidence_score: Score,
        cta: String,
        why_this_decision: Vec<String>,
        what_to_expect: RiskOutlook,
        supporting_details: SupportingDetails,
    ) -> Result<Self, ValidationError> {
        if headline.trim().is_empty() {
            return Err(ValidationError::empty_field("headline"));
        }
        Ok(Self {
            headline,
            summary,
            confidence_score,
            cta,
            why_this_decision,
            what_to_expect,
            supporting_details,
        })
    }

    /// Label derived from the confidence score.
    pub fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::from_score(self.confidence_score)
    }

    /// Label derived from the risk score.
    pub fn risk_label(&self) -> RiskLabel {
        self.what_to_expect.risk_label()
    }
}
