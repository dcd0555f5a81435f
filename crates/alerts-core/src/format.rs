//! Amount and percentage rendering for alert copy.

use std::sync::Arc;

/// Formats currency amounts for presentation.
pub trait AmountFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Renders amounts with a currency symbol and Indian digit grouping
/// (`1,00,000`), keeping at most two fraction digits.
#[derive(Debug, Clone)]
pub struct IndianAmountFormatter {
    symbol: String,
}

impl IndianAmountFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl Default for IndianAmountFormatter {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl AmountFormatter for IndianAmountFormatter {
    fn format_amount(&self, amount: f64) -> String {
        with_symbol(&self.symbol, amount, group_indian(amount.abs()))
    }
}

/// Renders amounts with a currency symbol and thousands grouping (`100,000`).
#[derive(Debug, Clone)]
pub struct ThousandsAmountFormatter {
    symbol: String,
}

impl ThousandsAmountFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl AmountFormatter for ThousandsAmountFormatter {
    fn format_amount(&self, amount: f64) -> String {
        with_symbol(&self.symbol, amount, group_thousands(amount.abs()))
    }
}

/// Picks the digit grouping for a BCP 47 locale tag.
///
/// Indian regions (`en-IN`, `hi-IN`, ...) group lakhs and crores; every other
/// locale groups by thousands.
pub fn formatter_for_locale(
    locale: &str,
    symbol: impl Into<String>,
) -> Arc<dyn AmountFormatter> {
    let indian = locale
        .rsplit(|c: char| c == '-' || c == '_')
        .next()
        .is_some_and(|region| region.eq_ignore_ascii_case("IN"));
    if indian {
        Arc::new(IndianAmountFormatter::new(symbol))
    } else {
        Arc::new(ThousandsAmountFormatter::new(symbol))
    }
}

fn with_symbol(symbol: &str, amount: f64, grouped: String) -> String {
    if amount < 0.0 && grouped != "0" {
        format!("-{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}

/// Groups a non-negative amount as `12,34,567.5`.
pub fn group_indian(amount: f64) -> String {
    group_digits(amount, 2)
}

/// Groups a non-negative amount as `1,234,567.5`.
pub fn group_thousands(amount: f64) -> String {
    group_digits(amount, 3)
}

/// The last three whole digits form one group; the rest split into groups of `lead`.
fn group_digits(amount: f64, lead: usize) -> String {
    if !amount.is_finite() {
        return "0".into();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut out = if whole.len() <= 3 {
        whole
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(lead);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    if fraction > 0 {
        if fraction % 10 == 0 {
            out.push_str(&format!(".{}", fraction / 10));
        } else {
            out.push_str(&format!(".{:02}", fraction));
        }
    }
    out
}

/// Whole-percent label, truncated toward zero (`112.5` -> `112`).
pub fn percent_label(pct: f64) -> String {
    if pct.is_finite() {
        format!("{}", pct.trunc() as i64)
    } else {
        "0".into()
    }
}
