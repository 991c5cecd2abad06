//! Budget model
//!
//! A monthly spending cap for one expense category. At most one budget
//! exists per (category, month) pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::Month;

/// A spending cap for a category in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Expense category this budget caps
    pub category: String,

    /// Cap for the month; zero means "no spending allowed"
    pub amount: Money,

    /// The month this budget applies to
    pub month: Month,
}

impl Budget {
    /// Create a new budget
    pub fn new(category: impl Into<String>, amount: Money, month: Month) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            month,
        }
    }

    /// Check whether this budget is for the given (category, month) pair
    pub fn is_for(&self, category: &str, month: Month) -> bool {
        self.category == category && self.month == month
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.category, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_for() {
        let month = Month::new(2025, 1).unwrap();
        let budget = Budget::new("Food", Money::from_units(500), month);
        assert!(budget.is_for("Food", month));
        assert!(!budget.is_for("Transport", month));
        assert!(!budget.is_for("Food", month.next()));
    }

    #[test]
    fn test_display() {
        let budget = Budget::new("Food", Money::from_units(500), Month::new(2025, 1).unwrap());
        assert_eq!(budget.to_string(), "2025-01 Food: KES 500.00");
    }
}
