//! Income and expense category sets
//!
//! Categories are plain strings drawn from a kind-specific set. Two names
//! are reserved for legs generated by transfers and savings contributions.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Category used on both legs of an account-to-account transfer
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// Category used on both legs of a savings contribution
pub const SAVINGS_CATEGORY: &str = "Savings";

/// Default income categories
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investments", "Gifts", "Other"];

/// Default expense categories
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Other",
];

/// The allowed categories for each transaction kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    pub income: Vec<String>,
    pub expense: Vec<String>,
}

impl CategorySet {
    /// Build from explicit lists
    pub fn new(income: Vec<String>, expense: Vec<String>) -> Self {
        Self { income, expense }
    }

    /// Categories allowed for `kind`
    pub fn for_kind(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Check membership for `kind`
    pub fn contains(&self, kind: TransactionKind, category: &str) -> bool {
        self.for_kind(kind).iter().any(|c| c == category)
    }

    /// Check whether a category name is reserved for system legs
    pub fn is_reserved(category: &str) -> bool {
        category == TRANSFER_CATEGORY || category == SAVINGS_CATEGORY
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            expense: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
