//! Spending Report
//!
//! Per-category totals for one transaction kind in one month, as used for
//! pie and bar charts.

use std::collections::BTreeMap;

use crate::models::{money::percentage_of, LedgerState, Money, Month, TransactionKind};

/// Sum amounts by category for non-transfer transactions of `kind` in `month`
///
/// Only categories with at least one transaction appear.
pub fn category_breakdown(
    state: &LedgerState,
    kind: TransactionKind,
    month: Month,
) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();

    for txn in state
        .transactions
        .iter()
        .filter(|t| t.kind == kind && !t.transfer && month.contains(t.date))
    {
        *totals.entry(txn.category.clone()).or_default() += txn.amount;
    }

    totals
}

/// One category row of a spending report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Share of the report total
    pub percentage: f64,
}

/// Category breakdown with shares, largest first
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub kind: TransactionKind,
    pub month: Month,
    pub categories: Vec<CategoryShare>,
    pub total: Money,
}

impl SpendingReport {
    pub fn generate(state: &LedgerState, kind: TransactionKind, month: Month) -> Self {
        let breakdown = category_breakdown(state, kind, month);
        let total: Money = breakdown.values().sum();

        let mut categories: Vec<CategoryShare> = breakdown
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                percentage: percentage_of(amount, total).unwrap_or(0.0),
                category,
                total: amount,
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            kind,
            month,
            categories,
            total,
        }
    }

    /// Get the top N categories
    pub fn top_categories(&self, limit: usize) -> &[CategoryShare] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
