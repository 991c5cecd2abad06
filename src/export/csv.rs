//! CSV Export functionality
//!
//! Exports a month's transactions, a month's budget usage, and all savings
//! goals to CSV format.

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::{LedgerState, Month, TransactionKind};
use crate::reports::budget_usage;

const UNKNOWN_ACCOUNT: &str = "Unknown Account";

fn account_name(state: &LedgerState, id: crate::models::AccountId) -> &str {
    state
        .account(id)
        .map(|a| a.name.as_str())
        .unwrap_or(UNKNOWN_ACCOUNT)
}

fn progress(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.0}%", p),
        None => "n/a".to_string(),
    }
}

/// Export every transaction dated in `month`, transfer legs included
///
/// Amounts carry an explicit `+` for income and `-` for expense.
pub fn export_transactions_csv<W: Write>(
    state: &LedgerState,
    month: Month,
    date_format: &str,
    writer: W,
) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Description", "Amount", "Type", "Category", "Account"])?;

    for txn in state.transactions.iter().filter(|t| month.contains(t.date)) {
        let sign = match txn.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        wtr.write_record([
            txn.date.format(date_format).to_string(),
            txn.label.clone(),
            format!("{}{}", sign, txn.amount.abs().format_plain()),
            txn.kind.to_string(),
            txn.category.clone(),
            account_name(state, txn.account_id).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export budget usage for `month`
pub fn export_budgets_csv<W: Write>(state: &LedgerState, month: Month, writer: W) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Category", "Budget", "Spent", "Remaining", "Progress"])?;

    for usage in budget_usage(state, month) {
        wtr.write_record([
            usage.budget.category.clone(),
            usage.budget.amount.format_plain(),
            usage.spent.format_plain(),
            usage.remaining.format_plain(),
            progress(usage.percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export every savings goal
pub fn export_goals_csv<W: Write>(state: &LedgerState, date_format: &str, writer: W) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Goal", "Target", "Saved", "Progress", "Deadline", "Account"])?;

    for goal in &state.savings_goals {
        wtr.write_record([
            goal.name.clone(),
            goal.target.format_plain(),
            goal.current.format_plain(),
            progress(Some(goal.progress_percentage())),
            goal.deadline.format(date_format).to_string(),
            account_name(state, goal.account_id).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
