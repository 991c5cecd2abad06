//! Reports module for HomeLedger
//!
//! Read-only queries over a [`LedgerState`](crate::models::LedgerState):
//! dashboard totals, budget usage, category breakdowns, cash-flow series
//! and filtered transaction history.

pub mod budget_usage;
pub mod cash_flow;
pub mod dashboard;
pub mod history;
pub mod spending;

pub use budget_usage::{budget_usage, BudgetUsage, UsageLevel};
pub use cash_flow::{time_series, CashFlowPoint};
pub use dashboard::{
    monthly_totals, net_worth, recent_transactions, savings_progress, DashboardSummary,
    MonthlyTotals, SavingsProgress,
};
pub use history::{filter_transactions, TransactionFilter};
pub use spending::{category_breakdown, CategoryShare, SpendingReport};
