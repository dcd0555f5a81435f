use std::collections::HashMap;

use alerts_domain::Transaction;

/// Per-category spend over one evaluation window. Rebuilt every tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendAggregate {
    by_category: HashMap<String, f64>,
}

impl SpendAggregate {
    /// Sums the absolute amount of each transaction per category.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut by_category: HashMap<String, f64> = HashMap::new();
        for txn in transactions {
            *by_category.entry(txn.category.clone()).or_default() += txn.spend();
        }
        Self { by_category }
    }

    /// Spend recorded for `category`, zero when nothing was spent.
    pub fn spent(&self, category: &str) -> f64 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }
}
