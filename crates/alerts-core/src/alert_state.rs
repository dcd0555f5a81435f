//! Session-scoped record of which alerts have already been shown.

use std::collections::HashSet;

use alerts_domain::{AlertKey, Band};
use uuid::Uuid;

/// Monotonic per-budget alert ladder.
///
/// Keys only ever get added. A `Warn` is suppressed once either `Warn` or
/// `Exceeded` has fired for the same budget; an `Exceeded` is suppressed once
/// `Exceeded` has fired. The key space is bounded by `2 * budgets`.
#[derive(Debug, Clone, Default)]
pub struct AlertState {
    shown: HashSet<AlertKey>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an alert of `band` may still be shown for `budget_id`.
    pub fn allows(&self, budget_id: Uuid, band: Band) -> bool {
        match band {
            Band::None => false,
            Band::Warn => {
                !self.shown.contains(&AlertKey::new(budget_id, Band::Warn))
                    && !self.shown.contains(&AlertKey::new(budget_id, Band::Exceeded))
            }
            Band::Exceeded => !self.shown.contains(&AlertKey::new(budget_id, Band::Exceeded)),
        }
    }

    /// Marks the alert as shown, returning whether the caller should emit it.
    pub fn try_mark(&mut self, budget_id: Uuid, band: Band) -> bool {
        if !self.allows(budget_id, band) {
            return false;
        }
        self.shown.insert(AlertKey::new(budget_id, band))
    }

    pub fn contains(&self, key: &AlertKey) -> bool {
        self.shown.contains(key)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_band_is_never_marked() {
        let mut state = AlertState::new();
        assert!(!state.try_mark(Uuid::new_v4(), Band::None));
        assert!(state.is_empty());
    }

    #[test]
    fn warn_then_exceeded_climbs_once_each() {
        let mut state = AlertState::new();
        let budget = Uuid::new_v4();

        assert!(state.try_mark(budget, Band::Warn));
        assert!(!state.try_mark(budget, Band::Warn));
        assert!(state.try_mark(budget, Band::Exceeded));
        assert!(!state.try_mark(budget, Band::Exceeded));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn exceeded_suppresses_later_warn() {
        let mut state = AlertState::new();
        let budget = Uuid::new_v4();

        assert!(state.try_mark(budget, Band::Exceeded));
        assert!(!state.try_mark(budget, Band::Warn));
        assert!(!state.contains(&AlertKey::new(budget, Band::Warn)));
    }

    #[test]
    fn budgets_are_tracked_independently() {
        let mut state = AlertState::new();
        let food = Uuid::new_v4();
        let travel = Uuid::new_v4();

        assert!(state.try_mark(food, Band::Exceeded));
        assert!(state.try_mark(travel, Band::Warn));
    }
}
