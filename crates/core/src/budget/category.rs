//! Expense breakdown by category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sitebook_shared::types::Money;

use crate::ledger::DebitEvent;

/// Total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category key as stored, e.g. `sand_aggregate`.
    pub category: String,
    /// Display label, e.g. `Sand aggregate`.
    pub label: String,
    /// Sum of expense subtotals.
    pub total: Money,
}

/// Groups expenses by category, largest total first.
///
/// Equal totals are ordered by category key so the output is deterministic.
#[must_use]
pub fn breakdown_by_category(events: &[DebitEvent]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for event in events {
        *totals.entry(event.category.as_str()).or_default() += event.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            label: humanize_category(category),
            total,
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    breakdown
}

/// Turns a category key into a label: underscores become spaces and the
/// first letter is upper-cased.
#[must_use]
pub fn humanize_category(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
