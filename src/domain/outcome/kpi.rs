//! KPI keys tracked against a chosen scenario.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// KPIs a scenario projection defines predicted ranges for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KpiKey {
    CustomerCount,
    Mrr,
    Arr,
}

impl KpiKey {
    /// All tracked KPIs.
    pub const ALL: [KpiKey; 3] = [KpiKey::CustomerCount, KpiKey::Mrr, KpiKey::Arr];

    /// Stable wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiKey::CustomerCount => "customer_count",
            KpiKey::Mrr => "mrr",
            KpiKey::Arr => "arr",
        }
    }
}

impl fmt::Display for KpiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KpiKey {
    type Err = ValidationError;

    /// Lenient parse: case, whitespace, hyphens and underscores are ignored,
    /// and a few common aliases are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "customercount" | "customers" | "activecustomers" => Ok(KpiKey::CustomerCount),
            "mrr" | "monthlyrecurringrevenue" => Ok(KpiKey::Mrr),
            "arr" | "annualrecurringrevenue" => Ok(KpiKey::Arr),
            _ => Err(ValidationError::invalid_format(
                "kpi_key",
                format!("unrecognized KPI '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_identifiers() {
        assert_eq!("customer_count".parse::<KpiKey>().unwrap(), KpiKey::CustomerCount);
        assert_eq!("mrr".parse::<KpiKey>().unwrap(), KpiKey::Mrr);
        assert_eq!("arr".parse::<KpiKey>().unwrap(), KpiKey::Arr);
    }

    #[test]
    fn parses_leniently() {
        assert_eq!(" Customer-Count ".parse::<KpiKey>().unwrap(), KpiKey::CustomerCount);
        assert_eq!("Monthly Recurring Revenue".parse::<KpiKey>().unwrap(), KpiKey::Mrr);
        assert_eq!("ARR".parse::<KpiKey>().unwrap(), KpiKey::Arr);
    }

    #[test]
    fn rejects_unknown_kpi() {
        assert!("nps".parse::<KpiKey>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&KpiKey::CustomerCount).unwrap(), "\"customer_count\"");
    }
}
