//! Budget Usage Report
//!
//! Compares each budget in a month against the expenses recorded in its
//! category.

use crate::models::{money::percentage_of, Budget, LedgerState, Money, Month};

/// How close a budget is to its cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    /// Up to 75% used
    Healthy,
    /// Above 75%
    Warning,
    /// Above 90%, or any spending against a zero budget
    Critical,
}

impl UsageLevel {
    fn from_percentage(percentage: f64) -> Self {
        if percentage > 90.0 {
            Self::Critical
        } else if percentage > 75.0 {
            Self::Warning
        } else {
            Self::Healthy
        }
    }
}

/// One budget with its spending
#[derive(Debug, Clone)]
pub struct BudgetUsage<'a> {
    pub budget: &'a Budget,
    pub spent: Money,
    /// Cap minus spent; negative when overspent
    pub remaining: Money,
    /// `None` for a zero budget
    pub percentage: Option<f64>,
    pub level: UsageLevel,
}

impl BudgetUsage<'_> {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Sum of non-transfer expenses in `category` dated within `month`
pub fn spent_in(state: &LedgerState, category: &str, month: Month) -> Money {
    state
        .transactions
        .iter()
        .filter(|t| t.is_expense() && !t.transfer && t.category == category && month.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// Usage for every budget in `month`, in budget creation order
pub fn budget_usage(state: &LedgerState, month: Month) -> Vec<BudgetUsage<'_>> {
    state
        .budgets_for(month)
        .into_iter()
        .map(|budget| {
            let spent = spent_in(state, &budget.category, month);
            let percentage = percentage_of(spent, budget.amount);
            let level = match percentage {
                Some(p) => UsageLevel::from_percentage(p),
                None if spent.is_zero() => UsageLevel::Healthy,
                None => UsageLevel::Critical,
            };

            BudgetUsage {
                budget,
                spent,
                remaining: budget.amount - spent,
                percentage,
                level,
            }
        })
        .collect()
}
