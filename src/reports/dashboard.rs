//! Dashboard Report
//!
//! Monthly income/expense totals, net worth, overall savings progress and
//! the most recent transactions.

use crate::models::{money::percentage_of, LedgerState, Money, Month, Transaction};

/// Income and expense totals for one month, transfers excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTotals {
    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Progress across every savings goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsProgress {
    pub total_target: Money,
    pub total_current: Money,
    /// 0 when there is no target at all
    pub percentage: f64,
}

/// Sum non-transfer income and expense dated within `month`
pub fn monthly_totals(state: &LedgerState, month: Month) -> MonthlyTotals {
    let mut totals = MonthlyTotals {
        month,
        income: Money::zero(),
        expense: Money::zero(),
    };

    for txn in state
        .transactions
        .iter()
        .filter(|t| !t.transfer && month.contains(t.date))
    {
        if txn.is_income() {
            totals.income += txn.amount;
        } else {
            totals.expense += txn.amount;
        }
    }

    totals
}

/// Sum of all account balances
pub fn net_worth(state: &LedgerState) -> Money {
    state.accounts.iter().map(|a| a.balance).sum()
}

pub fn savings_progress(state: &LedgerState) -> SavingsProgress {
    let total_target: Money = state.savings_goals.iter().map(|g| g.target).sum();
    let total_current: Money = state.savings_goals.iter().map(|g| g.current).sum();

    SavingsProgress {
        total_target,
        total_current,
        percentage: if total_target.is_positive() {
            percentage_of(total_current, total_target).unwrap_or(0.0)
        } else {
            0.0
        },
    }
}

/// The `limit` newest transactions by date, transfer legs included
///
/// Transactions on the same day keep their insertion order.
pub fn recent_transactions(state: &LedgerState, limit: usize) -> Vec<&Transaction> {
    let mut transactions: Vec<&Transaction> = state.transactions.iter().collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions.truncate(limit);
    transactions
}

/// Everything the dashboard shows
#[derive(Debug, Clone)]
pub struct DashboardSummary<'a> {
    pub totals: MonthlyTotals,
    pub net_worth: Money,
    pub savings: SavingsProgress,
    pub recent: Vec<&'a Transaction>,
}

impl<'a> DashboardSummary<'a> {
    /// Number of recent transactions shown
    pub const RECENT_LIMIT: usize = 5;

    pub fn generate(state: &'a LedgerState, month: Month) -> Self {
        Self {
            totals: monthly_totals(state, month),
            net_worth: net_worth(state),
            savings: savings_progress(state),
            recent: recent_transactions(state, Self::RECENT_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Account, AccountType, SavingsGoal, TransactionKind, TransferId, TRANSFER_CATEGORY,
    };
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn state() -> LedgerState {
        let mut state = LedgerState::default();
        let cash = Account::new("Cash", AccountType::Checking, Money::from_units(700));
        let bank = Account::new("Bank", AccountType::Savings, Money::from_units(300));
        let (cash_id, bank_id) = (cash.id, bank.id);
        state.accounts.extend([cash, bank]);

        let add = |kind, day: NaiveDate, amount, label: &str| {
            Transaction::new(kind, cash_id, day, Money::from_units(amount), "Other", label)
        };
        state.transactions.push(add(TransactionKind::Income, date(1, 1), 2000, "Pay"));
        state.transactions.push(add(TransactionKind::Expense, date(1, 20), 150, "Food"));
        state.transactions.push(add(TransactionKind::Expense, date(2, 3), 80, "Bus"));
        state.transactions.push(add(TransactionKind::Expense, date(1, 20), 40, "Snack"));

        let transfer = TransferId::new();
        state.transactions.push(Transaction::transfer_leg(
            TransactionKind::Expense,
            transfer,
            cash_id,
            date(1, 25),
            Money::from_units(300),
            TRANSFER_CATEGORY,
            "Transfer to Bank",
        ));
        state.transactions.push(Transaction::transfer_leg(
            TransactionKind::Income,
            transfer,
            bank_id,
            date(1, 25),
            Money::from_units(300),
            TRANSFER_CATEGORY,
            "Transfer from Cash",
        ));
        state
    }

    #[test]
    fn test_monthly_totals_exclude_transfers() {
        let totals = monthly_totals(&state(), Month::new(2025, 1).unwrap());
        assert_eq!(totals.income, Money::from_units(2000));
        assert_eq!(totals.expense, Money::from_units(190));
        assert_eq!(totals.net(), Money::from_units(1810));
    }

    #[test]
    fn test_net_worth() {
        assert_eq!(net_worth(&state()), Money::from_units(1000));
    }

    #[test]
    fn test_savings_progress() {
        let mut state = state();
        assert_eq!(savings_progress(&state).percentage, 0.0);

        let account = state.accounts[1].id;
        let mut goal = SavingsGoal::new("Laptop", Money::from_units(4000), date(12, 1), account);
        goal.current = Money::from_units(1000);
        state.savings_goals.push(goal);
        state
            .savings_goals
            .push(SavingsGoal::new("Trip", Money::from_units(1000), date(6, 1), account));

        let progress = savings_progress(&state);
        assert_eq!(progress.total_target, Money::from_units(5000));
        assert_eq!(progress.total_current, Money::from_units(1000));
        assert_eq!(progress.percentage, 20.0);
    }

    #[test]
    fn test_recent_transactions_newest_first_and_stable() {
        let state = state();
        let recent = recent_transactions(&state, 4);

        let labels: Vec<&str> = recent.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Bus", "Transfer to Bank", "Transfer from Cash", "Food"]
        );
    }

    #[test]
    fn test_dashboard_summary() {
        let state = state();
        let summary = DashboardSummary::generate(&state, Month::new(2025, 2).unwrap());

        assert_eq!(summary.totals.expense, Money::from_units(80));
        assert_eq!(summary.recent.len(), DashboardSummary::RECENT_LIMIT);
        assert_eq!(summary.net_worth, Money::from_units(1000));
    }
}
