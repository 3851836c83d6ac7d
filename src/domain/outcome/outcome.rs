//! Outcome record - measured real-world results for a decision.
//!
//! A decision carries a single outcome record that evolves over time via
//! upsert-merge, never one record per scenario attempt. Free-text inputs
//! are normalized defensively: unparseable dates and numbers become `None`
//! rather than errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;

use super::KpiKey;

/// Reconciliation status of an outcome record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Created, nothing measured yet.
    Pending,
    /// Actuals are being collected.
    Monitoring,
    /// Measurement window closed and reviewed.
    Reconciled,
}

/// Predicted range plus actual measurement for one KPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiEntry {
    pub predicted_min: f64,
    pub predicted_max: f64,
    pub actual: Option<f64>,
}

impl KpiEntry {
    /// Creates an entry with a predicted range and no measurement.
    pub fn predicted(min: f64, max: f64) -> Self {
        Self {
            predicted_min: min,
            predicted_max: max,
            actual: None,
        }
    }
}

/// The decision's single evolving outcome record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub decision_taken: Option<bool>,
    pub date_implemented: Option<Timestamp>,
    pub status: OutcomeStatus,
    pub notes: Option<String>,
    pub kpis: BTreeMap<KpiKey, KpiEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Outcome {
    /// Creates an empty outcome seeded with predicted KPI ranges.
    pub fn seeded(kpis: BTreeMap<KpiKey, KpiEntry>) -> Self {
        let now = Timestamp::now();
        Self {
            decision_taken: None,
            date_implemented: None,
            status: OutcomeStatus::Pending,
            notes: None,
            kpis,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges a partial update into this record.
    ///
    /// Provided fields replace, absent fields are left alone. KPI actuals
    /// with unknown keys or unparseable values are skipped, not rejected.
    pub fn merge(&mut self, patch: &OutcomePatch) {
        if let Some(taken) = patch.decision_taken {
            self.decision_taken = Some(taken);
        }
        if let Some(raw) = patch.date_implemented.as_deref() {
            if let Some(date) = normalize_date(raw) {
                self.date_implemented = Some(date);
            }
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes.clone() {
            self.notes = Some(notes);
        }
        for (raw_key, raw_value) in &patch.kpi_actuals {
            let Ok(key) = raw_key.parse::<KpiKey>() else {
                continue;
            };
            let Some(value) = normalize_number(raw_value) else {
                continue;
            };
            if let Some(entry) = self.kpis.get_mut(&key) {
                entry.actual = Some(value);
            }
        }
        self.updated_at = Timestamp::now();
    }
}

/// Partial outcome update with free-text KPI inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomePatch {
    pub decision_taken: Option<bool>,
    /// Free text; parsed as RFC 3339 or a plain date, else ignored.
    pub date_implemented: Option<String>,
    pub status: Option<OutcomeStatus>,
    pub notes: Option<String>,
    /// Free-text actuals keyed by KPI name.
    pub kpi_actuals: BTreeMap<String, String>,
}

impl OutcomePatch {
    /// True when the patch carries nothing to merge.
    pub fn is_empty(&self) -> bool {
        self.decision_taken.is_none()
            && self.date_implemented.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.kpi_actuals.is_empty()
    }
}

/// Parses a free-text date. RFC 3339 first, then common plain-date forms.
fn normalize_date(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::from_datetime(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
            return Some(Timestamp::from_datetime(dt));
        }
    }
    None
}

/// Parses a free-text number, tolerating currency symbols and separators.
fn normalize_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '%' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
