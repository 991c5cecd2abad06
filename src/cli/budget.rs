//! Budget CLI commands
//!
//! Implements CLI commands for monthly category caps and their usage.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_budget_usage, money};
use crate::error::LedgerResult;
use crate::reports::budget_usage;
use crate::services::BudgetService;
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_amount, parse_month};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set (or replace) the cap for an expense category
    Set {
        /// Expense category
        category: String,
        /// Amount (e.g., "5000" or "5000.00")
        amount: String,
        /// Budget month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budget usage for a month
    List {
        /// Budget month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command<B: Backend>(
    session: &mut Session<B>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let amount = parse_amount("amount", &amount)?;
            let month = parse_month(month.as_deref())?;

            let result = BudgetService::new(session).upsert(&category, amount, month)?;
            let verb = if result.created { "Set" } else { "Updated" };
            println!(
                "{} budget for {} in {}: {}",
                verb,
                result.budget.category,
                result.budget.month,
                money(result.budget.amount, code)
            );
        }

        BudgetCommands::List { month } => {
            let month = parse_month(month.as_deref())?;
            println!("Budgets for {}", month);
            println!("{}", format_budget_usage(&budget_usage(session.state(), month), code));
        }
    }

    Ok(())
}
