//! Decision aggregate entity.
//!
//! A decision is the unit of consistency: the two append-only version
//! streams (context, verdict), the status audit trail, the scenario set and
//! the single outcome record all change under one revision counter so an
//! optimistic-concurrency check covers every invariant at once.
//!
//! # Invariants
//!
//! - `context_version == context_versions.len()`, entries numbered 1..=n
//! - `verdict_version == verdict_versions.len()`, independent counter
//! - version entries are never mutated or removed, only appended
//! - the materialized `context`/`verdict` always equal the latest entry
//!   (they are only written by the append operations)
//! - at most one scenario is `chosen` at a time
//! - status changes always append a `StatusEvent`, never one without the other

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DecisionId, DomainError, ErrorCode, ScenarioId, StateMachine, Timestamp, UserId,
};
use crate::domain::outcome::{
    compute_deltas, predicted_envelope, DeltaReport, EffectiveOutcome, KpiEntry, KpiKey,
    Outcome, OutcomePatch, ScenarioDelta,
};
use crate::domain::scenario::Scenario;
use crate::domain::simulation::SimulationInput;

use super::{
    ContextVersion, DecisionContext, DecisionStatus, ModelMeta, StatusEvent, Verdict,
    VerdictVersion,
};

/// Maximum length for the company name.
pub const MAX_COMPANY_NAME_LENGTH: usize = 200;

/// Headline impact summary derived from the chosen scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedImpact {
    pub customer_count_min: i64,
    pub customer_count_max: i64,
    pub arr_min: f64,
    pub arr_max: f64,
    pub summary: String,
}

impl ExpectedImpact {
    /// Builds the impact summary from a scenario's projection envelope.
    pub fn from_scenario(scenario: &Scenario) -> Option<Self> {
        let (count_min, count_max) =
            predicted_envelope(&scenario.projection, KpiKey::CustomerCount)?;
        let (arr_min, arr_max) = predicted_envelope(&scenario.projection, KpiKey::Arr)?;
        let summary = format!(
            "{}: {}-{} customers, {} {:.0}-{:.0} ARR",
            scenario.name,
            count_min as i64,
            count_max as i64,
            scenario.projection.currency,
            arr_min,
            arr_max
        );
        Some(Self {
            customer_count_min: count_min as i64,
            customer_count_max: count_max as i64,
            arr_min,
            arr_max,
            summary,
        })
    }
}

/// Decision aggregate - a pricing-change proposal tracked through its full
/// lifecycle with versioned context and verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    id: DecisionId,
    owner: UserId,
    company_name: String,
    website: Option<String>,

    /// Pricing inputs the decision was modeled on; scenarios and verdict
    /// regeneration re-simulate from these.
    pricing: SimulationInput,

    status: DecisionStatus,
    status_events: Vec<StatusEvent>,

    /// Materialized current context; written only by version appends.
    context: DecisionContext,
    context_version: u32,
    context_versions: Vec<ContextVersion>,

    /// Materialized current verdict; written only by version appends.
    verdict: Verdict,
    verdict_version: u32,
    verdict_versions: Vec<VerdictVersion>,

    scenarios: Vec<Scenario>,
    outcome: Option<Outcome>,
    expected_impact: Option<ExpectedImpact>,

    deleted_at: Option<Timestamp>,

    /// Optimistic-concurrency counter, bumped on every mutation.
    revision: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Decision {
    /// Creates a new pending decision at context/verdict version 1.
    ///
    /// Creation records the initial `pending` status event.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the company name is empty or too long
    /// - `OutOfRange` and friends for invalid pricing inputs
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DecisionId,
        owner: UserId,
        company_name: String,
        website: Option<String>,
        pricing: SimulationInput,
        context: DecisionContext,
        context_reason: impl Into<String>,
        verdict: Verdict,
        model_meta: ModelMeta,
    ) -> Result<Self, DomainError> {
        Self::validate_company_name(&company_name)?;
        pricing.validate()?;

        let now = Timestamp::now();
        let creation_event =
            StatusEvent::new(DecisionStatus::Pending, "Decision created", owner.clone());

        Ok(Self {
            id,
            owner,
            company_name,
            website,
            pricing,
            status: DecisionStatus::Pending,
            status_events: vec![creation_event],
            context: context.clone(),
            context_version: 1,
            context_versions: vec![ContextVersion::new(1, context, context_reason)],
            verdict: verdict.clone(),
            verdict_version: 1,
            verdict_versions: vec![VerdictVersion::new(1, verdict, model_meta)],
            scenarios: Vec::new(),
            outcome: None,
            expected_impact: None,
            deleted_at: None,
            revision: 1,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DecisionId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn pricing(&self) -> &SimulationInput {
        &self.pricing
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn status_events(&self) -> &[StatusEvent] {
        &self.status_events
    }

    /// Current context (the latest context version's snapshot).
    pub fn context(&self) -> &DecisionContext {
        &self.context
    }

    pub fn context_version(&self) -> u32 {
        self.context_version
    }

    pub fn context_versions(&self) -> &[ContextVersion] {
        &self.context_versions
    }

    /// Current verdict (the latest verdict version's snapshot).
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn verdict_version(&self) -> u32 {
        self.verdict_version
    }

    pub fn verdict_versions(&self) -> &[VerdictVersion] {
        &self.verdict_versions
    }

    /// Model metadata of the latest verdict version.
    pub fn model_meta(&self) -> Option<&ModelMeta> {
        self.verdict_versions.last().map(|v| &v.model_meta)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The currently chosen scenario, if any.
    pub fn chosen_scenario(&self) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.chosen)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn expected_impact(&self) -> Option<&ExpectedImpact> {
        self.expected_impact.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn deleted_at(&self) -> Option<&Timestamp> {
        self.deleted_at.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this decision.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }

    /// Validates that the user can access this decision.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User is not authorized to access this decision",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Versioning
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a context version and replaces the materialized context.
    ///
    /// Prior entries are untouched; the counter advances by exactly one.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `EmptyField` if no reason is given
    pub fn append_context_version(
        &mut self,
        context: DecisionContext,
        reason: impl Into<String>,
    ) -> Result<u32, DomainError> {
        self.ensure_active()?;
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "A reason is required when updating the context",
            ));
        }

        let version = self.context_version + 1;
        self.context_versions
            .push(ContextVersion::new(version, context.clone(), reason));
        self.context_version = version;
        self.context = context;
        self.touch();
        Ok(version)
    }

    /// Appends a verdict version and replaces the materialized verdict.
    ///
    /// The verdict's labels are derived from its scores on access, so a
    /// fresh append can never carry stale labels.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    pub fn append_verdict_version(
        &mut self,
        verdict: Verdict,
        model_meta: ModelMeta,
    ) -> Result<u32, DomainError> {
        self.ensure_active()?;

        let version = self.verdict_version + 1;
        self.verdict_versions
            .push(VerdictVersion::new(version, verdict.clone(), model_meta));
        self.verdict_version = version;
        self.verdict = verdict;
        self.touch();
        Ok(version)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Transitions the status, appending the audit event atomically.
    ///
    /// Either both the status and its event are applied or, on an invalid
    /// transition, neither is.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `InvalidStateTransition` naming current and requested states
    pub fn transition_status(
        &mut self,
        target: DecisionStatus,
        reason: impl Into<String>,
        actor: UserId,
        implemented_at: Option<Timestamp>,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;
        let next = self.status.transition_to(target)?;

        let mut event = StatusEvent::new(next, reason, actor);
        if let Some(at) = implemented_at {
            event = event.with_implemented_at(at);
        }
        self.status_events.push(event);
        self.status = next;
        self.touch();
        Ok(())
    }

    /// Records a rollback event on a completed decision.
    ///
    /// The status stays `completed`; only the event carries the rollback
    /// marker. Legacy semantics preserved on purpose.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `InvalidStateTransition` if the decision is not completed
    pub fn record_rollback(
        &mut self,
        reason: impl Into<String>,
        actor: UserId,
        rollback_at: Timestamp,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;
        if self.status != DecisionStatus::Completed {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Rollback events can only be recorded on a completed decision, not {:?}",
                    self.status
                ),
            ));
        }

        self.status_events.push(
            StatusEvent::new(DecisionStatus::Completed, reason, actor)
                .with_rollback_at(rollback_at),
        );
        self.touch();
        Ok(())
    }

    /// Soft-deletes the decision together with its scenarios and outcome.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if already deleted
    pub fn soft_delete(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.deleted_at = Some(Timestamp::now());
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scenarios
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the scenario set, preserving a previously chosen scenario.
    ///
    /// Regeneration discards prior unchosen scenarios; a chosen one stays
    /// untouched since outcomes may already reference it. Incoming scenarios
    /// are always stored unchosen.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    pub fn replace_unchosen_scenarios(
        &mut self,
        scenarios: Vec<Scenario>,
    ) -> Result<(), DomainError> {
        self.ensure_active()?;

        self.scenarios.retain(|s| s.chosen);
        self.scenarios.extend(scenarios.into_iter().map(|mut s| {
            s.chosen = false;
            s
        }));
        self.touch();
        Ok(())
    }

    /// Marks one scenario as chosen, un-choosing any prior choice.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `ScenarioNotFound` if the scenario does not belong to this decision
    pub fn choose_scenario(&mut self, scenario_id: ScenarioId) -> Result<(), DomainError> {
        self.ensure_active()?;

        if !self.scenarios.iter().any(|s| s.id == scenario_id) {
            return Err(DomainError::new(
                ErrorCode::ScenarioNotFound,
                "Scenario does not belong to this decision",
            )
            .with_detail("scenario_id", scenario_id.to_string()));
        }

        for scenario in &mut self.scenarios {
            scenario.chosen = scenario.id == scenario_id;
        }
        self.expected_impact = self.chosen_scenario().and_then(ExpectedImpact::from_scenario);
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────────────────

    /// Upsert-merges a partial outcome into the decision's single record.
    ///
    /// The first merge seeds predicted KPI ranges from the chosen scenario's
    /// projection. Unparseable free-text fields in the patch are skipped,
    /// never rejected.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `OutcomeNotRecordable` unless the status is approved or completed
    pub fn record_outcome(&mut self, patch: &OutcomePatch) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.ensure_outcome_recordable()?;

        if self.outcome.is_none() {
            self.outcome = Some(Outcome::seeded(self.seed_kpis()));
        }
        if let Some(outcome) = self.outcome.as_mut() {
            outcome.merge(patch);
        }
        self.touch();
        Ok(())
    }

    /// Sets the measured actual for one KPI.
    ///
    /// # Errors
    ///
    /// - `DecisionDeleted` if the decision is soft-deleted
    /// - `OutcomeNotRecordable` unless the status is approved or completed
    /// - `UnknownKpi` if the chosen scenario's projection does not define
    ///   the KPI (including when no scenario is chosen)
    pub fn set_kpi_actual(&mut self, kpi: KpiKey, actual: f64) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.ensure_outcome_recordable()?;

        if self.outcome.is_none() {
            self.outcome = Some(Outcome::seeded(self.seed_kpis()));
        }
        let outcome = match self.outcome.as_mut() {
            Some(outcome) => outcome,
            None => return Err(DomainError::invariant("Outcome vanished during update")),
        };
        match outcome.kpis.get_mut(&kpi) {
            Some(entry) => {
                entry.actual = Some(actual);
            }
            None => {
                return Err(DomainError::new(
                    ErrorCode::UnknownKpi,
                    "KPI is not defined on the chosen scenario's projection",
                )
                .with_detail("kpi", kpi.to_string()));
            }
        }
        self.touch();
        Ok(())
    }

    /// Computes predicted-vs-actual deltas for every measured KPI.
    pub fn compute_deltas(&self) -> Vec<ScenarioDelta> {
        self.outcome.as_ref().map(compute_deltas).unwrap_or_default()
    }

    /// Builds the read-optimized effective outcome view.
    pub fn effective_outcome(&self) -> EffectiveOutcome {
        EffectiveOutcome {
            decision_id: self.id,
            chosen_scenario: self.chosen_scenario().map(|s| s.name.clone()),
            outcome: self.outcome.clone(),
            deltas: self.compute_deltas(),
            as_of: Timestamp::now(),
        }
    }

    /// Builds the delta history report for the learning collaborator.
    ///
    /// Returns `None` when nothing has been measured yet.
    pub fn delta_report(&self) -> Option<DeltaReport> {
        let deltas = self.compute_deltas();
        if deltas.is_empty() {
            return None;
        }
        Some(DeltaReport {
            decision_id: self.id,
            scenario: self.chosen_scenario().map(|s| s.name.clone()),
            deltas,
            generated_at: Timestamp::now(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Invariants
    // ─────────────────────────────────────────────────────────────────────────

    /// Verifies the aggregate's append-only invariants.
    ///
    /// Called by repositories on read. A violation signals a bug (or a
    /// corrupted document) and is surfaced loudly, never silently repaired.
    ///
    /// # Errors
    ///
    /// - `InvariantViolation` describing the first broken invariant found
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        if self.context_version as usize != self.context_versions.len() {
            return Err(DomainError::invariant(format!(
                "context_version {} does not match {} stored versions",
                self.context_version,
                self.context_versions.len()
            )));
        }
        if self.verdict_version as usize != self.verdict_versions.len() {
            return Err(DomainError::invariant(format!(
                "verdict_version {} does not match {} stored versions",
                self.verdict_version,
                self.verdict_versions.len()
            )));
        }
        for (index, entry) in self.context_versions.iter().enumerate() {
            if entry.version as usize != index + 1 {
                return Err(DomainError::invariant(format!(
                    "context version entry {} is numbered {}",
                    index + 1,
                    entry.version
                )));
            }
        }
        for (index, entry) in self.verdict_versions.iter().enumerate() {
            if entry.version as usize != index + 1 {
                return Err(DomainError::invariant(format!(
                    "verdict version entry {} is numbered {}",
                    index + 1,
                    entry.version
                )));
            }
        }
        match self.context_versions.last() {
            Some(last) if last.context == self.context => {}
            Some(_) => {
                return Err(DomainError::invariant(
                    "Materialized context diverged from the latest context version",
                ));
            }
            None => {
                return Err(DomainError::invariant("Decision has no context versions"));
            }
        }
        match self.verdict_versions.last() {
            Some(last) if last.verdict == self.verdict => {}
            Some(_) => {
                return Err(DomainError::invariant(
                    "Materialized verdict diverged from the latest verdict version",
                ));
            }
            None => {
                return Err(DomainError::invariant("Decision has no verdict versions"));
            }
        }
        let chosen_count = self.scenarios.iter().filter(|s| s.chosen).count();
        if chosen_count > 1 {
            return Err(DomainError::invariant(format!(
                "{} scenarios are marked chosen",
                chosen_count
            )));
        }
        if self.status_events.is_empty() {
            return Err(DomainError::invariant("Decision has no status events"));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Seeds KPI entries from the chosen scenario's projection envelope.
    fn seed_kpis(&self) -> std::collections::BTreeMap<KpiKey, KpiEntry> {
        let mut kpis = std::collections::BTreeMap::new();
        if let Some(chosen) = self.chosen_scenario() {
            for kpi in KpiKey::ALL {
                if let Some((min, max)) = predicted_envelope(&chosen.projection, kpi) {
                    kpis.insert(kpi, KpiEntry::predicted(min, max));
                }
            }
        }
        kpis
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_deleted() {
            Err(DomainError::new(
                ErrorCode::DecisionDeleted,
                "Decision has been deleted",
            ))
        } else {
            Ok(())
        }
    }

    fn ensure_outcome_recordable(&self) -> Result<(), DomainError> {
        if self.status.allows_outcome_recording() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::OutcomeNotRecordable,
                format!(
                    "Outcomes can only be recorded while approved or completed, not {:?}",
                    self.status
                ),
            ))
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Timestamp::now();
    }

    fn validate_company_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "company_name",
                "Company name cannot be empty",
            ));
        }
        if trimmed.len() > MAX_COMPANY_NAME_LENGTH {
            return Err(DomainError::validation(
                "company_name",
                format!(
                    "Company name must be {} characters or less",
                    MAX_COMPANY_NAME_LENGTH
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{RiskOutlook, SupportingDetails};
    use crate::domain::elasticity::{ElasticityConfig, PricingGoal};
    use crate::domain::foundation::{Currency, Score};
    use crate::domain::outcome::ComparisonStatus;
    use crate::domain::scenario::{ScenarioName, ScenarioNarrative};
    use crate::domain::simulation::{SimulationEngine, SimulationResult};
    use std::collections::BTreeMap;

    fn owner() -> UserId {
        UserId::new("founder@acme.test").unwrap()
    }

    fn pricing() -> SimulationInput {
        SimulationInput {
            current_price: 79.0,
            new_price: 99.0,
            active_customers: 423,
            currency: Currency::usd(),
            global_mrr: 0.0,
            global_churn_rate: 0.04,
            goal: PricingGoal::Base,
        }
    }

    fn verdict(confidence: f64) -> Verdict {
        Verdict::new(
            "Raise to $99".to_string(),
            "Feature depth supports a premium position.".to_string(),
            Score::new(confidence),
            "Start with new signups".to_string(),
            vec!["Underpriced against the comparable set".to_string()],
            RiskOutlook {
                risk_score: Score::new(0.4),
                description: "Churn bump expected for two billing cycles".to_string(),
            },
            SupportingDetails {
                expected_revenue_impact: "ARR up 8-15%".to_string(),
                churn_outlook: "Temporary".to_string(),
                market_positioning: "Mid-market".to_string(),
            },
        )
        .unwrap()
    }

    fn model_meta() -> ModelMeta {
        ModelMeta {
            model: "verdict-v2".to_string(),
            prompt_version: "2025-05".to_string(),
            inference_ms: 840,
        }
    }

    fn projection(goal: PricingGoal) -> SimulationResult {
        SimulationEngine::new(ElasticityConfig::shared_default())
            .simulate(&pricing().with_goal(goal))
            .unwrap()
    }

    fn scenario(goal: PricingGoal) -> Scenario {
        Scenario::new(
            ScenarioName::from_goal(goal),
            goal,
            ScenarioNarrative {
                description: format!("{} option", goal),
                rationale: "fits the stage".to_string(),
                watchouts: vec![],
            },
            projection(goal),
        )
    }

    fn decision() -> Decision {
        Decision::new(
            DecisionId::new(),
            owner(),
            "Acme Analytics".to_string(),
            Some("acme.test".to_string()),
            pricing(),
            DecisionContext::empty(),
            "initial intake",
            verdict(0.7),
            model_meta(),
        )
        .unwrap()
    }

    fn decision_with_chosen_scenario() -> Decision {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![
            scenario(PricingGoal::Conservative),
            scenario(PricingGoal::Base),
            scenario(PricingGoal::Aggressive),
        ])
        .unwrap();
        let base_id = d.scenarios()[1].id;
        d.choose_scenario(base_id).unwrap();
        d.transition_status(DecisionStatus::Approved, "ship it", owner(), None)
            .unwrap();
        d
    }

    // Construction

    #[test]
    fn new_decision_is_pending_at_version_one_one() {
        let d = decision();
        assert_eq!(d.status(), DecisionStatus::Pending);
        assert_eq!(d.context_version(), 1);
        assert_eq!(d.verdict_version(), 1);
        assert_eq!(d.context_versions().len(), 1);
        assert_eq!(d.verdict_versions().len(), 1);
    }

    #[test]
    fn new_decision_records_creation_event() {
        let d = decision();
        assert_eq!(d.status_events().len(), 1);
        assert_eq!(d.status_events()[0].status, DecisionStatus::Pending);
    }

    #[test]
    fn new_decision_rejects_empty_company_name() {
        let result = Decision::new(
            DecisionId::new(),
            owner(),
            "   ".to_string(),
            None,
            pricing(),
            DecisionContext::empty(),
            "initial",
            verdict(0.7),
            model_meta(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_decision_rejects_invalid_pricing() {
        let mut bad = pricing();
        bad.active_customers = 0;
        let result = Decision::new(
            DecisionId::new(),
            owner(),
            "Acme".to_string(),
            None,
            bad,
            DecisionContext::empty(),
            "initial",
            verdict(0.7),
            model_meta(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_decision_passes_invariant_check() {
        decision().check_invariants().unwrap();
    }

    // Context versioning

    #[test]
    fn append_context_version_increments_and_keeps_history() {
        let mut d = decision();
        let first_snapshot = d.context_versions()[0].clone();

        let context = DecisionContext {
            company_stage: crate::domain::decision::ContextField::user("seed".to_string()),
            ..DecisionContext::empty()
        };
        let version = d.append_context_version(context.clone(), "user filled stage").unwrap();

        assert_eq!(version, 2);
        assert_eq!(d.context_version(), 2);
        assert_eq!(d.context_versions().len(), 2);
        assert_eq!(d.context(), &context);
        // Prior entry byte-for-byte unchanged.
        assert_eq!(d.context_versions()[0], first_snapshot);
        d.check_invariants().unwrap();
    }

    #[test]
    fn append_context_version_requires_reason() {
        let mut d = decision();
        let result = d.append_context_version(DecisionContext::empty(), "  ");
        assert!(result.is_err());
        assert_eq!(d.context_version(), 1);
    }

    #[test]
    fn append_context_version_does_not_touch_verdict_stream() {
        let mut d = decision();
        d.append_context_version(DecisionContext::empty(), "noop refresh")
            .unwrap();
        assert_eq!(d.verdict_version(), 1);
    }

    // Verdict versioning

    #[test]
    fn append_verdict_version_increments_independently() {
        let mut d = decision();
        let version = d.append_verdict_version(verdict(0.9), model_meta()).unwrap();

        assert_eq!(version, 2);
        assert_eq!(d.verdict_version(), 2);
        assert_eq!(d.context_version(), 1);
        assert_eq!(d.verdict().confidence_score, Score::new(0.9));
        d.check_invariants().unwrap();
    }

    #[test]
    fn model_meta_tracks_latest_verdict_version() {
        let mut d = decision();
        let mut meta = model_meta();
        meta.model = "verdict-v3".to_string();
        d.append_verdict_version(verdict(0.8), meta).unwrap();
        assert_eq!(d.model_meta().unwrap().model, "verdict-v3");
    }

    // Lifecycle

    #[test]
    fn approve_then_complete_appends_two_events_in_order() {
        let mut d = decision();
        d.transition_status(DecisionStatus::Approved, "approved", owner(), None)
            .unwrap();
        d.transition_status(
            DecisionStatus::Completed,
            "rolled out",
            owner(),
            Some(Timestamp::now()),
        )
        .unwrap();

        assert_eq!(d.status(), DecisionStatus::Completed);
        let events = d.status_events();
        assert_eq!(events.len(), 3); // creation + 2 transitions
        assert_eq!(events[1].status, DecisionStatus::Approved);
        assert_eq!(events[2].status, DecisionStatus::Completed);
        assert!(events[1].timestamp <= events[2].timestamp);
    }

    #[test]
    fn invalid_transition_leaves_status_and_events_unchanged() {
        let mut d = decision();
        d.transition_status(DecisionStatus::Rejected, "not now", owner(), None)
            .unwrap();
        let events_before = d.status_events().len();

        let err = d
            .transition_status(DecisionStatus::Approved, "changed mind", owner(), None)
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(d.status(), DecisionStatus::Rejected);
        assert_eq!(d.status_events().len(), events_before);
    }

    #[test]
    fn rollback_requires_completed_status() {
        let mut d = decision();
        let err = d
            .record_rollback("reverting", owner(), Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn rollback_on_completed_keeps_status_and_flags_event() {
        let mut d = decision();
        d.transition_status(DecisionStatus::Approved, "go", owner(), None)
            .unwrap();
        d.transition_status(DecisionStatus::Completed, "done", owner(), None)
            .unwrap();
        d.record_rollback("pricing backlash", owner(), Timestamp::now())
            .unwrap();

        assert_eq!(d.status(), DecisionStatus::Completed);
        let last = d.status_events().last().unwrap();
        assert!(last.is_rollback());
        assert_eq!(last.status, DecisionStatus::Completed);
    }

    // Scenarios

    #[test]
    fn replace_unchosen_scenarios_swaps_the_set() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![scenario(PricingGoal::Base)])
            .unwrap();
        assert_eq!(d.scenarios().len(), 1);

        d.replace_unchosen_scenarios(vec![
            scenario(PricingGoal::Conservative),
            scenario(PricingGoal::Aggressive),
        ])
        .unwrap();
        assert_eq!(d.scenarios().len(), 2);
    }

    #[test]
    fn replace_unchosen_scenarios_preserves_chosen_one() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![
            scenario(PricingGoal::Conservative),
            scenario(PricingGoal::Base),
        ])
        .unwrap();
        let chosen_id = d.scenarios()[0].id;
        d.choose_scenario(chosen_id).unwrap();

        d.replace_unchosen_scenarios(vec![scenario(PricingGoal::Aggressive)])
            .unwrap();

        assert_eq!(d.scenarios().len(), 2);
        let chosen = d.chosen_scenario().unwrap();
        assert_eq!(chosen.id, chosen_id);
        d.check_invariants().unwrap();
    }

    #[test]
    fn choose_scenario_unchooses_prior() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![
            scenario(PricingGoal::Conservative),
            scenario(PricingGoal::Base),
        ])
        .unwrap();
        let first = d.scenarios()[0].id;
        let second = d.scenarios()[1].id;

        d.choose_scenario(first).unwrap();
        d.choose_scenario(second).unwrap();

        assert_eq!(d.chosen_scenario().unwrap().id, second);
        assert_eq!(d.scenarios().iter().filter(|s| s.chosen).count(), 1);
    }

    #[test]
    fn choose_scenario_rejects_foreign_id() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![scenario(PricingGoal::Base)])
            .unwrap();
        let err = d.choose_scenario(ScenarioId::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ScenarioNotFound);
        assert!(d.chosen_scenario().is_none());
    }

    #[test]
    fn choose_scenario_sets_expected_impact() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![scenario(PricingGoal::Base)])
            .unwrap();
        let id = d.scenarios()[0].id;
        d.choose_scenario(id).unwrap();

        let impact = d.expected_impact().unwrap();
        assert!(impact.customer_count_min <= impact.customer_count_max);
        assert!(impact.arr_min > 0.0);
    }

    // Outcomes

    #[test]
    fn record_outcome_requires_approved_or_completed() {
        let mut d = decision();
        let err = d.record_outcome(&OutcomePatch::default()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutcomeNotRecordable);
    }

    #[test]
    fn record_outcome_twice_merges_into_single_record() {
        let mut d = decision_with_chosen_scenario();

        d.record_outcome(&OutcomePatch {
            decision_taken: Some(true),
            ..Default::default()
        })
        .unwrap();
        d.record_outcome(&OutcomePatch {
            notes: Some("done".to_string()),
            ..Default::default()
        })
        .unwrap();

        let outcome = d.outcome().unwrap();
        assert_eq!(outcome.decision_taken, Some(true));
        assert_eq!(outcome.notes.as_deref(), Some("done"));
    }

    #[test]
    fn record_outcome_seeds_kpis_from_chosen_scenario() {
        let mut d = decision_with_chosen_scenario();
        d.record_outcome(&OutcomePatch::default()).unwrap();

        let outcome = d.outcome().unwrap();
        assert_eq!(outcome.kpis.len(), KpiKey::ALL.len());
        for entry in outcome.kpis.values() {
            assert!(entry.predicted_min <= entry.predicted_max);
            assert!(entry.actual.is_none());
        }
    }

    #[test]
    fn set_kpi_actual_updates_entry() {
        let mut d = decision_with_chosen_scenario();
        d.set_kpi_actual(KpiKey::Mrr, 38_500.0).unwrap();
        let entry = d.outcome().unwrap().kpis[&KpiKey::Mrr];
        assert_eq!(entry.actual, Some(38_500.0));
    }

    #[test]
    fn set_kpi_actual_without_chosen_scenario_is_unknown_kpi() {
        let mut d = decision();
        d.transition_status(DecisionStatus::Approved, "go", owner(), None)
            .unwrap();
        let err = d.set_kpi_actual(KpiKey::Mrr, 1000.0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownKpi);
    }

    #[test]
    fn deltas_classify_boundary_values_on_track() {
        let mut d = decision_with_chosen_scenario();
        d.record_outcome(&OutcomePatch::default()).unwrap();
        let min = d.outcome().unwrap().kpis[&KpiKey::Mrr].predicted_min;
        d.set_kpi_actual(KpiKey::Mrr, min).unwrap();

        let deltas = d.compute_deltas();
        let mrr = deltas.iter().find(|delta| delta.kpi == KpiKey::Mrr).unwrap();
        assert_eq!(mrr.status, ComparisonStatus::OnTrack);
    }

    #[test]
    fn deltas_omit_unmeasured_kpis() {
        let mut d = decision_with_chosen_scenario();
        d.set_kpi_actual(KpiKey::Arr, 500_000.0).unwrap();
        let deltas = d.compute_deltas();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].kpi, KpiKey::Arr);
    }

    #[test]
    fn effective_outcome_bundles_outcome_and_deltas() {
        let mut d = decision_with_chosen_scenario();
        d.set_kpi_actual(KpiKey::Arr, 500_000.0).unwrap();

        let view = d.effective_outcome();
        assert_eq!(view.decision_id, *d.id());
        assert!(view.outcome.is_some());
        assert_eq!(view.deltas.len(), 1);
        assert_eq!(view.chosen_scenario, Some(ScenarioName::Base));
    }

    #[test]
    fn delta_report_is_none_before_measurement() {
        let d = decision_with_chosen_scenario();
        assert!(d.delta_report().is_none());
    }

    // Soft delete

    #[test]
    fn soft_delete_blocks_further_mutation() {
        let mut d = decision();
        d.soft_delete().unwrap();
        assert!(d.is_deleted());

        let err = d
            .append_context_version(DecisionContext::empty(), "update")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecisionDeleted);

        let err = d.soft_delete().unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecisionDeleted);
    }

    // Revision counter

    #[test]
    fn every_mutation_bumps_revision() {
        let mut d = decision();
        let r0 = d.revision();
        d.append_context_version(DecisionContext::empty(), "refresh")
            .unwrap();
        let r1 = d.revision();
        d.append_verdict_version(verdict(0.8), model_meta()).unwrap();
        let r2 = d.revision();
        assert!(r0 < r1 && r1 < r2);
    }

    // Authorization

    #[test]
    fn non_owner_is_forbidden() {
        let d = decision();
        let other = UserId::new("intruder@evil.test").unwrap();
        assert_eq!(d.authorize(&other).unwrap_err().code(), ErrorCode::Forbidden);
        assert!(d.authorize(&owner()).is_ok());
    }

    // Invariant detection

    #[test]
    fn tampered_version_counter_fails_invariant_check() {
        let d = decision();
        let mut json = serde_json::to_value(&d).unwrap();
        json["context_version"] = serde_json::json!(5);
        let tampered: Decision = serde_json::from_value(json).unwrap();

        let err = tampered.check_invariants().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvariantViolation);
    }

    #[test]
    fn tampered_chosen_flags_fail_invariant_check() {
        let mut d = decision();
        d.replace_unchosen_scenarios(vec![
            scenario(PricingGoal::Conservative),
            scenario(PricingGoal::Base),
        ])
        .unwrap();
        let mut json = serde_json::to_value(&d).unwrap();
        json["scenarios"][0]["chosen"] = serde_json::json!(true);
        json["scenarios"][1]["chosen"] = serde_json::json!(true);
        let tampered: Decision = serde_json::from_value(json).unwrap();

        let err = tampered.check_invariants().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvariantViolation);
    }
}
