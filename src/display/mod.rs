//! Display formatting for terminal output
//!
//! Renders accounts, transactions and reports as `tabled` tables. Every
//! amount is shown with the configured currency code and two decimals.

pub mod account;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use report::{
    format_budget_usage, format_cash_flow, format_dashboard, format_goal_list, format_spending,
};
pub use transaction::{format_transaction_details, format_transaction_list};

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Money;

/// Render an amount as e.g. `KES 1500.00`
pub fn money(amount: Money, currency_code: &str) -> String {
    amount.format_with_code(currency_code)
}

/// Render a percentage with no decimals, or `n/a`
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{:.0}%", p),
        None => "n/a".to_string(),
    }
}

/// Build a table in the shared style, right-aligning the given columns
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, right_aligned: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    for &column in right_aligned {
        table.with(Modify::new(Columns::single(column)).with(Alignment::right()));
    }
    table.to_string()
}
