//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_goal_list, money, percent};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{ContributionInput, GoalUpdate, SavingsService};
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_amount, parse_date, resolve_account, resolve_goal};

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// Account that holds the savings
        #[arg(short, long)]
        account: String,
    },
    /// List goals with their progress
    List,
    /// Edit a goal; saved progress is kept
    Edit {
        /// Goal name or ID
        goal: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// New savings account
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Move money from an account into a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount to contribute
        amount: String,
        /// Funding account name or ID
        #[arg(short, long)]
        from: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Notes copied onto both legs
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Delete a goal; contributed funds stay in the account
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a savings goal command
pub fn handle_goal_command<B: Backend>(
    session: &mut Session<B>,
    settings: &Settings,
    cmd: GoalCommands,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            deadline,
            account,
        } => {
            let target = parse_amount("target", &target)?;
            let deadline = parse_deadline(&deadline)?;
            let account_id = resolve_account(session, &account)?;

            let goal = SavingsService::new(session).add_goal(&name, target, deadline, account_id)?;
            println!("Created savings goal: {}", goal.name);
            println!("  Target:   {}", money(goal.target, code));
            println!("  Deadline: {}", goal.deadline.format(&settings.date_format));
            println!("  ID:       {}", goal.id);
        }

        GoalCommands::List => {
            println!(
                "{}",
                format_goal_list(
                    session.state(),
                    session.savings_goals(),
                    code,
                    &settings.date_format
                )
            );
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            deadline,
            account,
        } => {
            let id = resolve_goal(session, &goal)?;
            let update = GoalUpdate {
                name,
                target: target
                    .as_deref()
                    .map(|t| parse_amount("target", t))
                    .transpose()?,
                deadline: deadline.as_deref().map(parse_deadline).transpose()?,
                account_id: match account {
                    Some(account) => Some(resolve_account(session, &account)?),
                    None => None,
                },
            };

            let updated = SavingsService::new(session).edit_goal(id, update)?;
            println!("Updated savings goal: {}", updated.name);
        }

        GoalCommands::Contribute {
            goal,
            amount,
            from,
            date,
            notes,
        } => {
            let goal_id = resolve_goal(session, &goal)?;
            let input = ContributionInput {
                goal_id,
                from_account_id: resolve_account(session, &from)?,
                amount: parse_amount("amount", &amount)?,
                date: parse_date(date.as_deref())?,
                notes,
            };

            let result = SavingsService::new(session).contribute(input)?;
            println!(
                "Contributed {} to {}",
                money(result.from_transaction.amount, code),
                result.goal.name
            );
            println!(
                "  Saved: {} of {} ({})",
                money(result.goal.current, code),
                money(result.goal.target, code),
                percent(Some(result.goal.progress_percentage()))
            );
            if result.goal.is_reached() {
                println!("  Goal reached!");
            }
        }

        GoalCommands::Delete { goal } => {
            let id = resolve_goal(session, &goal)?;
            let removed = SavingsService::new(session).delete_goal(id)?;
            println!("Deleted savings goal: {}", removed.name);
        }
    }

    Ok(())
}

fn parse_deadline(input: &str) -> LedgerResult<chrono::NaiveDate> {
    parse_date(Some(input)).map_err(|_| {
        LedgerError::validation("deadline", format!("'{}' is not a date (use YYYY-MM-DD)", input))
    })
}
