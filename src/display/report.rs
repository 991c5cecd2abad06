//! Report display formatting
//!
//! Terminal views of the dashboard, budget usage, savings goals, category
//! spending and cash flow.

use tabled::Tabled;

use crate::models::{LedgerState, SavingsGoal};
use crate::reports::{BudgetUsage, CashFlowPoint, DashboardSummary, SpendingReport, UsageLevel};

use super::transaction::format_transaction_list;
use super::{money, percent, render_table};

/// Format the dashboard summary
pub fn format_dashboard(
    state: &LedgerState,
    summary: &DashboardSummary<'_>,
    currency_code: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Dashboard: {}\n", summary.totals.month));
    output.push_str(&format!(
        "  Income:    {}\n",
        money(summary.totals.income, currency_code)
    ));
    output.push_str(&format!(
        "  Expenses:  {}\n",
        money(summary.totals.expense, currency_code)
    ));
    output.push_str(&format!(
        "  Net worth: {}\n",
        money(summary.net_worth, currency_code)
    ));
    output.push_str(&format!(
        "  Savings:   {} of {} ({})\n",
        money(summary.savings.total_current, currency_code),
        money(summary.savings.total_target, currency_code),
        percent(Some(summary.savings.percentage))
    ));
    output.push_str("\nRecent transactions:\n");
    output.push_str(&format_transaction_list(
        state,
        &summary.recent,
        currency_code,
        date_format,
    ));
    output.push('\n');
    output
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

fn level_label(level: UsageLevel) -> &'static str {
    match level {
        UsageLevel::Healthy => "OK",
        UsageLevel::Warning => "Warning",
        UsageLevel::Critical => "Critical",
    }
}

/// Format budget usage rows
pub fn format_budget_usage(usage: &[BudgetUsage<'_>], currency_code: &str) -> String {
    if usage.is_empty() {
        return "No budgets set for this month.".to_string();
    }

    let rows: Vec<BudgetRow> = usage
        .iter()
        .map(|u| BudgetRow {
            category: u.budget.category.clone(),
            budget: money(u.budget.amount, currency_code),
            spent: money(u.spent, currency_code),
            remaining: money(u.remaining, currency_code),
            progress: percent(u.percentage),
            status: level_label(u.level),
        })
        .collect();

    render_table(rows, &[1, 2, 3, 4])
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Account")]
    account: String,
}

/// Format savings goals with their progress
pub fn format_goal_list(
    state: &LedgerState,
    goals: &[SavingsGoal],
    currency_code: &str,
    date_format: &str,
) -> String {
    if goals.is_empty() {
        return "No savings goals found.".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.to_string(),
            name: g.name.clone(),
            target: money(g.target, currency_code),
            saved: money(g.current, currency_code),
            progress: percent(Some(g.progress_percentage())),
            deadline: g.deadline.format(date_format).to_string(),
            account: state
                .account(g.account_id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown Account".to_string()),
        })
        .collect();

    render_table(rows, &[2, 3, 4])
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format a category breakdown
pub fn format_spending(report: &SpendingReport, currency_code: &str) -> String {
    if report.categories.is_empty() {
        return format!("No {} recorded in {}.", report.kind, report.month);
    }

    let mut rows: Vec<ShareRow> = report
        .categories
        .iter()
        .map(|c| ShareRow {
            category: c.category.clone(),
            amount: money(c.total, currency_code),
            share: format!("{:.1}%", c.percentage),
        })
        .collect();
    rows.push(ShareRow {
        category: "TOTAL".to_string(),
        amount: money(report.total, currency_code),
        share: "100.0%".to_string(),
    });

    format!(
        "{} by category, {}\n{}",
        report.kind,
        report.month,
        render_table(rows, &[1, 2])
    )
}

#[derive(Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Format a cash-flow series
pub fn format_cash_flow(points: &[CashFlowPoint], currency_code: &str) -> String {
    if points.is_empty() {
        return "No transactions in range.".to_string();
    }

    let rows: Vec<CashFlowRow> = points
        .iter()
        .map(|p| CashFlowRow {
            month: p.month.to_string(),
            income: money(p.income, currency_code),
            expense: money(p.expense, currency_code),
            net: money(p.income - p.expense, currency_code),
        })
        .collect();

    render_table(rows, &[1, 2, 3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, Budget, Money, Month, TransactionKind};
    use crate::reports::budget_usage;
    use chrono::NaiveDate;

    #[test]
    fn test_budget_usage_table() {
        let mut state = LedgerState::default();
        let month = Month::new(2025, 1).unwrap();
        state.budgets.push(Budget::new("Food", Money::zero(), month));
        let usage = budget_usage(&state, month);

        let output = format_budget_usage(&usage, "KES");
        assert!(output.contains("Food"));
        assert!(output.contains("n/a"));
        assert!(output.contains("OK"));
    }

    #[test]
    fn test_goal_list() {
        let state = LedgerState::default();
        let goals = vec![SavingsGoal::new(
            "Laptop",
            Money::from_units(5000),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            AccountId::new(),
        )];

        let output = format_goal_list(&state, &goals, "KES", "%Y-%m-%d");
        assert!(output.contains("Laptop"));
        assert!(output.contains("KES 5000.00"));
        assert!(output.contains("0%"));
        assert!(output.contains("Unknown Account"));
    }

    #[test]
    fn test_empty_spending() {
        let state = LedgerState::default();
        let report = SpendingReport::generate(&state, TransactionKind::Expense, Month::new(2025, 1).unwrap());
        assert_eq!(format_spending(&report, "KES"), "No expense recorded in 2025-01.");
    }

    #[test]
    fn test_cash_flow_net_column() {
        let points = vec![CashFlowPoint {
            month: Month::new(2025, 1).unwrap(),
            income: Money::from_units(100),
            expense: Money::from_units(150),
        }];
        let output = format_cash_flow(&points, "KES");
        assert!(output.contains("KES -50.00"));
    }
}
