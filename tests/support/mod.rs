use std::{fs, path::Path};

use alerts_domain::{Budget, Transaction};
use chrono::Utc;
use uuid::Uuid;

/// Writes a Food budget of 8,000 and `spent` of Food spend dated now.
pub fn seed_food_budget(root: &Path, user: Uuid, spent: f64) {
    let budgets = vec![Budget::new(user, "Food", 8000.0).with_emoji("🍔")];
    let txns = vec![Transaction::new(user, "Food", -spent, Utc::now())];
    fs::write(
        root.join("budgets.json"),
        serde_json::to_string_pretty(&budgets).expect("encode budgets"),
    )
    .expect("write budgets");
    fs::write(
        root.join("transactions.json"),
        serde_json::to_string_pretty(&txns).expect("encode transactions"),
    )
    .expect("write transactions");
}
