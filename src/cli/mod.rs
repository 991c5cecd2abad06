//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.
//! Handlers only call queries and service operations; the session
//! owns every collection.

pub mod account;
pub mod budget;
pub mod export;
pub mod goal;
pub mod report;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_dashboard_command, handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfer_command, TransferArgs};
pub use user::handle_register_command;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, AccountType, Money, Month, SavingsGoalId};
use crate::services::{AccountService, SavingsService};
use crate::session::Session;
use crate::storage::Backend;

/// Parse a user-entered amount such as `1500`, `1500.50` or `KES 1500`
pub(crate) fn parse_amount(field: &'static str, input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::validation(
            field,
            format!("'{}' is not an amount (use e.g. '1000.00'): {}", input, e),
        )
    })
}

/// Parse `YYYY-MM-DD`, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> LedgerResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::validation("date", format!("'{}' is not a date (use YYYY-MM-DD)", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse `YYYY-MM`, defaulting to the current month
pub(crate) fn parse_month(input: Option<&str>) -> LedgerResult<Month> {
    match input {
        Some(s) => Month::parse(s).map_err(|e| LedgerError::validation("month", e.to_string())),
        None => Ok(Month::current()),
    }
}

pub(crate) fn parse_account_type(input: &str) -> LedgerResult<AccountType> {
    AccountType::parse(input).ok_or_else(|| {
        LedgerError::validation(
            "account type",
            format!(
                "'{}' is not an account type (checking, savings, credit, investment, other)",
                input
            ),
        )
    })
}

/// Resolve an account by name or id
pub(crate) fn resolve_account<B: Backend>(
    session: &mut Session<B>,
    identifier: &str,
) -> LedgerResult<AccountId> {
    AccountService::new(session).resolve(identifier).map(|a| a.id)
}

/// Resolve a savings goal by name or id
pub(crate) fn resolve_goal<B: Backend>(
    session: &mut Session<B>,
    identifier: &str,
) -> LedgerResult<SavingsGoalId> {
    SavingsService::new(session).resolve(identifier).map(|g| g.id)
}
