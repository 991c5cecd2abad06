//! CLI commands for reports
//!
//! Provides the dashboard and the category and cash-flow reports.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_cash_flow, format_dashboard, format_spending};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Month, TransactionKind};
use crate::reports::{time_series, DashboardSummary, SpendingReport};
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_date, parse_month};

/// Months covered by `report cash-flow` when no start is given
const DEFAULT_CASH_FLOW_MONTHS: usize = 6;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals per category for a month
    Spending {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Break down income instead of expenses
        #[arg(long)]
        income: bool,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },

    /// Income and expenses per month
    #[command(alias = "cashflow")]
    CashFlow {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Handle the dashboard command
pub fn handle_dashboard_command<B: Backend>(
    session: &Session<B>,
    settings: &Settings,
    month: Option<String>,
) -> LedgerResult<()> {
    let month = parse_month(month.as_deref())?;
    let summary = DashboardSummary::generate(session.state(), month);
    print!(
        "{}",
        format_dashboard(
            session.state(),
            &summary,
            &settings.currency_code,
            &settings.date_format
        )
    );
    Ok(())
}

/// Handle a report command
pub fn handle_report_command<B: Backend>(
    session: &Session<B>,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    match cmd {
        ReportCommands::Spending { month, income, top } => {
            let month = parse_month(month.as_deref())?;
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let mut report = SpendingReport::generate(session.state(), kind, month);
            if let Some(limit) = top {
                report.categories.truncate(limit);
            }
            println!("{}", format_spending(&report, code));
        }

        ReportCommands::CashFlow { start, end } => {
            let end = parse_date(end.as_deref())?;
            let start = match start {
                Some(s) => parse_date(Some(s.as_str()))?,
                None => months_back(Month::of(end), DEFAULT_CASH_FLOW_MONTHS).start_date(),
            };
            if start > end {
                return Err(LedgerError::validation(
                    "start",
                    format!("{} is after the end date {}", start, end),
                ));
            }

            println!("{}", format_cash_flow(&time_series(session.state(), start, end), code));
        }
    }

    Ok(())
}

/// The month `count - 1` months before `month`
fn months_back(month: Month, count: usize) -> Month {
    (1..count).fold(month, |m, _| m.prev())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_back_crosses_year() {
        let feb = Month::new(2025, 2).unwrap();
        assert_eq!(months_back(feb, 6), Month::new(2024, 9).unwrap());
        assert_eq!(months_back(feb, 1), feb);
    }
}
