//! Score value object (unit interval).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0.0 and 1.0 inclusive.
///
/// Used for verdict confidence and risk scores. Labels (low/medium/high)
/// are always derived from the score, never stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Zero score.
    pub const ZERO: Self = Self(0.0);

    /// Maximum score.
    pub const ONE: Self = Self(1.0);

    /// Creates a new Score, clamping to the unit interval.
    ///
    /// NaN clamps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Score, returning error if out of range or NaN.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_new_accepts_valid_values() {
        assert_eq!(Score::new(0.0).value(), 0.0);
        assert_eq!(Score::new(0.5).value(), 0.5);
        assert_eq!(Score::new(1.0).value(), 1.0);
    }

    #[test]
    fn score_new_clamps_out_of_range() {
        assert_eq!(Score::new(1.5).value(), 1.0);
        assert_eq!(Score::new(-0.2).value(), 0.0);
    }

    #[test]
    fn score_new_treats_nan_as_zero() {
        assert_eq!(Score::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn score_try_new_accepts_valid_values() {
        assert!(Score::try_new(0.0).is_ok());
        assert!(Score::try_new(0.73).is_ok());
        assert!(Score::try_new(1.0).is_ok());
    }

    #[test]
    fn score_try_new_rejects_out_of_range() {
        assert!(Score::try_new(1.01).is_err());
        assert!(Score::try_new(-0.01).is_err());
        assert!(Score::try_new(f64::NAN).is_err());
    }

    #[test]
    fn score_displays_two_decimals() {
        assert_eq!(format!("{}", Score::new(0.731)), "0.73");
        assert_eq!(format!("{}", Score::ONE), "1.00");
    }

    #[test]
    fn score_serializes_to_json() {
        let score = Score::new(0.5);
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, "0.5");
    }

    #[test]
    fn score_ordering_works() {
        assert!(Score::new(0.2) < Score::new(0.8));
    }
}
