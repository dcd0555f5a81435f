//! Severity bands and the dedupe key used by the alert ladder.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Percentage above which spend counts as approaching the limit.
pub const WARN_THRESHOLD_PCT: f64 = 80.0;
/// Percentage above which spend counts as over the limit.
pub const EXCEEDED_THRESHOLD_PCT: f64 = 100.0;

/// Severity classification of a spend-vs-limit ratio.
///
/// Variants are ordered so that `None < Warn < Exceeded`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    None,
    Warn,
    Exceeded,
}

impl Band {
    /// Classifies a usage percentage. `(80, 100]` warns, anything above 100 exceeds.
    pub fn classify(pct: f64) -> Self {
        if pct.is_nan() {
            Band::None
        } else if pct > EXCEEDED_THRESHOLD_PCT {
            Band::Exceeded
        } else if pct > WARN_THRESHOLD_PCT {
            Band::Warn
        } else {
            Band::None
        }
    }

    pub fn is_alerting(self) -> bool {
        self != Band::None
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Band::None => "none",
            Band::Warn => "warn",
            Band::Exceeded => "exceeded",
        };
        f.write_str(label)
    }
}

/// Identifies one alert of one severity for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub budget_id: Uuid,
    pub band: Band,
}

impl AlertKey {
    pub fn new(budget_id: Uuid, band: Band) -> Self {
        Self { budget_id, band }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_respects_band_edges() {
        assert_eq!(Band::classify(0.0), Band::None);
        assert_eq!(Band::classify(75.0), Band::None);
        assert_eq!(Band::classify(80.0), Band::None);
        assert_eq!(Band::classify(80.01), Band::Warn);
        assert_eq!(Band::classify(100.0), Band::Warn);
        assert_eq!(Band::classify(100.01), Band::Exceeded);
        assert_eq!(Band::classify(f64::INFINITY), Band::Exceeded);
        assert_eq!(Band::classify(f64::NAN), Band::None);
    }

    #[test]
    fn bands_are_ordered_as_a_ladder() {
        assert!(Band::None < Band::Warn);
        assert!(Band::Warn < Band::Exceeded);
    }
}
