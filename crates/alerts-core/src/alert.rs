//! An emitted budget alert and the copy rendered from it.

use alerts_domain::{
    emoji_label, Band, Budget, NewNotification, Notice, NoticeSeverity, NotificationKind,
};
use uuid::Uuid;

use crate::format::{percent_label, AmountFormatter};

const WARN_NOTICE_MS: u64 = 5_000;
const EXCEEDED_NOTICE_MS: u64 = 6_000;

/// A budget that crossed into a new band during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub budget_id: Uuid,
    pub category: String,
    pub emoji: Option<String>,
    band: Band,
    pub spent: f64,
    pub limit: f64,
    pub pct: f64,
}

impl BudgetAlert {
    /// Builds the alert for an alerting band; `Band::None` yields nothing.
    pub fn new(budget: &Budget, band: Band, spent: f64, pct: f64) -> Option<Self> {
        if !band.is_alerting() {
            return None;
        }
        Some(Self {
            budget_id: budget.id,
            category: budget.category.clone(),
            emoji: budget.emoji.clone(),
            band,
            spent,
            limit: budget.limit,
            pct,
        })
    }

    /// Always `Warn` or `Exceeded`.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Amount spent beyond the limit, zero when within it.
    pub fn overspend(&self) -> f64 {
        (self.spent - self.limit).max(0.0)
    }

    pub fn notice(&self, fmt: &dyn AmountFormatter) -> Notice {
        let limit = fmt.format_amount(self.limit);
        let pct = percent_label(self.pct);
        match self.band {
            Band::Exceeded => Notice {
                title: self.label(&format!("Budget exceeded: {}", self.category)),
                description: format!(
                    "You've overspent by {} ({}% of {} budget)",
                    fmt.format_amount(self.overspend()),
                    pct,
                    limit
                ),
                severity: NoticeSeverity::Error,
                duration_ms: EXCEEDED_NOTICE_MS,
            },
            // Unreachable: `new` rejects `Band::None`.
            Band::Warn | Band::None => Notice {
                title: self.label(&format!("Approaching {} limit", self.category)),
                description: format!("{}% of {} {} budget used.", pct, limit, self.category),
                severity: NoticeSeverity::Warning,
                duration_ms: WARN_NOTICE_MS,
            },
        }
    }

    pub fn notification(&self, user_id: Uuid, fmt: &dyn AmountFormatter) -> NewNotification {
        let spent = fmt.format_amount(self.spent);
        let limit = fmt.format_amount(self.limit);
        let (kind, title, message) = match self.band {
            Band::Exceeded => (
                NotificationKind::BudgetAlert,
                self.label(&format!("{} budget exceeded!", self.category)),
                format!(
                    "You've spent {} of your {} budget, {} over limit.",
                    spent,
                    limit,
                    fmt.format_amount(self.overspend())
                ),
            ),
            Band::Warn | Band::None => (
                NotificationKind::BudgetWarning,
                self.label(&format!(
                    "{} budget at {}%",
                    self.category,
                    percent_label(self.pct)
                )),
                format!(
                    "You've used {} of your {} {} budget.",
                    spent, limit, self.category
                ),
            ),
        };
        NewNotification {
            user_id,
            kind,
            title,
            message,
            category: Some(self.category.clone()),
        }
    }

    fn label(&self, text: &str) -> String {
        emoji_label(self.emoji.as_deref(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::IndianAmountFormatter;

    fn food(limit: f64) -> Budget {
        Budget::new(Uuid::new_v4(), "Food", limit).with_emoji("🍔")
    }

    #[test]
    fn warn_copy_reports_percentage_used() {
        let fmt = IndianAmountFormatter::default();
        let alert = BudgetAlert::new(&food(8000.0), Band::Warn, 6800.0, 85.0).expect("warn alert");

        let notice = alert.notice(&fmt);
        assert_eq!(notice.title, "🍔 Approaching Food limit");
        assert_eq!(notice.description, "85% of ₹8,000 Food budget used.");
        assert_eq!(notice.severity, NoticeSeverity::Warning);

        let user = Uuid::new_v4();
        let row = alert.notification(user, &fmt);
        assert_eq!(row.kind, NotificationKind::BudgetWarning);
        assert_eq!(row.title, "🍔 Food budget at 85%");
        assert_eq!(row.message, "You've used ₹6,800 of your ₹8,000 Food budget.");
        assert_eq!(row.category.as_deref(), Some("Food"));
        assert_eq!(row.user_id, user);
    }

    #[test]
    fn exceeded_copy_reports_overspend() {
        let fmt = IndianAmountFormatter::default();
        let alert = BudgetAlert::new(&food(8000.0), Band::Exceeded, 9000.0, 112.5).expect("exceeded alert");

        let notice = alert.notice(&fmt);
        assert_eq!(notice.title, "🍔 Budget exceeded: Food");
        assert!(notice
            .description
            .contains("overspent by ₹1,000 (112% of ₹8,000"));
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert_eq!(notice.duration_ms, 6_000);

        let row = alert.notification(Uuid::new_v4(), &fmt);
        assert_eq!(row.kind, NotificationKind::BudgetAlert);
        assert_eq!(row.title, "🍔 Food budget exceeded!");
        assert_eq!(
            row.message,
            "You've spent ₹9,000 of your ₹8,000 budget, ₹1,000 over limit."
        );
    }

    #[test]
    fn titles_have_no_leading_space_without_emoji() {
        let budget = Budget::new(Uuid::new_v4(), "Bills", 100.0);
        let alert = BudgetAlert::new(&budget, Band::Warn, 90.0, 90.0).expect("warn alert");
        assert_eq!(
            alert.notice(&IndianAmountFormatter::default()).title,
            "Approaching Bills limit"
        );
    }

    #[test]
    fn none_band_builds_no_alert() {
        let budget = food(8000.0);
        assert!(BudgetAlert::new(&budget, Band::None, 100.0, 1.25).is_none());
    }
}
