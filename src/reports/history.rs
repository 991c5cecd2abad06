//! Transaction history filter
//!
//! Narrows the transaction list for the income and expense tables.

use crate::models::{LedgerState, Month, Transaction, TransactionKind};

/// Filter options for transaction history; all set criteria must match
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only this kind
    pub kind: Option<TransactionKind>,
    /// Case-insensitive substring of the label or notes
    pub search: Option<String>,
    /// Exact category name
    pub category: Option<String>,
    /// Only transactions dated within this month
    pub month: Option<Month>,
    /// Include transfer and savings legs
    pub include_transfers: bool,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn include_transfers(mut self) -> Self {
        self.include_transfers = true;
        self
    }

    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if txn.transfer && !self.include_transfers {
            return false;
        }

        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }

        if let Some(month) = self.month {
            if !month.contains(txn.date) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !txn.label.to_lowercase().contains(&needle)
                && !txn.notes.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// Matching transactions, newest date first; same-day ties keep insertion order
pub fn filter_transactions<'a>(
    state: &'a LedgerState,
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let mut matched: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|t| filter.matches(t))
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Money};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, day: u32, category: &str, label: &str, notes: &str) -> Transaction {
        let mut txn = Transaction::new(
            kind,
            AccountId::new(),
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::from_units(10),
            category,
            label,
        );
        txn.notes = notes.to_string();
        txn
    }

    fn state() -> LedgerState {
        let mut state = LedgerState::default();
        state.transactions.extend([
            txn(TransactionKind::Expense, 5, "Food", "Weekly groceries", ""),
            txn(TransactionKind::Expense, 9, "Transport", "Bus pass", "monthly GROCERY run"),
            txn(TransactionKind::Income, 1, "Salary", "Acme Ltd", ""),
            txn(TransactionKind::Expense, 5, "Food", "Lunch", ""),
        ]);
        let mut leg = txn(TransactionKind::Expense, 20, "Transfer", "Transfer to Bank", "");
        leg.transfer = true;
        state.transactions.push(leg);
        state
    }

    fn labels(found: &[&Transaction]) -> Vec<String> {
        found.iter().map(|t| t.label.clone()).collect()
    }

    #[test]
    fn test_kind_filter_orders_newest_first() {
        let state = state();
        let found = filter_transactions(&state, &TransactionFilter::new().kind(TransactionKind::Expense));

        assert_eq!(labels(&found), vec!["Bus pass", "Weekly groceries", "Lunch"]);
    }

    #[test]
    fn test_search_label_and_notes_case_insensitive() {
        let state = state();
        let found = filter_transactions(&state, &TransactionFilter::new().search("grocer"));

        assert_eq!(labels(&found), vec!["Bus pass", "Weekly groceries"]);
    }

    #[test]
    fn test_criteria_combine() {
        let state = state();
        let filter = TransactionFilter::new()
            .kind(TransactionKind::Expense)
            .category("Food")
            .search("lunch")
            .month(Month::new(2025, 1).unwrap());

        assert_eq!(labels(&filter_transactions(&state, &filter)), vec!["Lunch"]);

        let other_month = TransactionFilter::new().month(Month::new(2025, 2).unwrap());
        assert!(filter_transactions(&state, &other_month).is_empty());
    }

    #[test]
    fn test_transfers_opt_in() {
        let state = state();
        assert_eq!(filter_transactions(&state, &TransactionFilter::new()).len(), 4);

        let found = filter_transactions(&state, &TransactionFilter::new().include_transfers());
        assert_eq!(found.len(), 5);
        assert_eq!(found[0].label, "Transfer to Bank");
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let state = state();
        let found = filter_transactions(&state, &TransactionFilter::new().search("  "));
        assert_eq!(found.len(), 4);
    }
}
