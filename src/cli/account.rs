//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_account_details, format_account_list, money};
use crate::error::LedgerResult;
use crate::services::{AccountService, AccountUpdate, TransactionService};
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_account_type, parse_amount, resolve_account};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, investment, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New account type
        #[arg(short = 't', long)]
        account_type: Option<String>,
        /// Overwrite the balance directly
        #[arg(short, long)]
        balance: Option<String>,
    },
    /// Delete an account with its transactions and savings goals
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command<B: Backend>(
    session: &mut Session<B>,
    settings: &Settings,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    match cmd {
        AccountCommands::Add {
            name,
            account_type,
            balance,
        } => {
            let account_type = parse_account_type(&account_type)?;
            let balance = parse_amount("balance", &balance)?;

            let account = AccountService::new(session).add_account(&name, account_type, balance)?;

            println!("Created account: {}", account.name);
            println!("  Type:    {}", account.account_type);
            println!("  Balance: {}", money(account.balance, code));
            println!("  ID:      {}", account.id);
        }

        AccountCommands::List => {
            println!("{}", format_account_list(session.accounts(), code));
        }

        AccountCommands::Show { account } => {
            let id = resolve_account(session, &account)?;
            let count = TransactionService::new(session).list_for_account(id).len();
            if let Some(found) = session.state().account(id) {
                print!("{}", format_account_details(found, count, code));
            }
        }

        AccountCommands::Edit {
            account,
            name,
            account_type,
            balance,
        } => {
            if name.is_none() && account_type.is_none() && balance.is_none() {
                println!("No changes specified. Use --name, --account-type or --balance.");
                return Ok(());
            }

            let id = resolve_account(session, &account)?;
            let update = AccountUpdate {
                name,
                account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                balance: balance
                    .as_deref()
                    .map(|b| parse_amount("balance", b))
                    .transpose()?,
            };

            let updated = AccountService::new(session).edit_account(id, update)?;
            println!("Updated account: {}", updated.name);
            println!("  Balance: {}", money(updated.balance, code));
        }

        AccountCommands::Delete { account } => {
            let id = resolve_account(session, &account)?;
            let deletion = AccountService::new(session).delete_account(id)?;

            println!("Deleted account: {}", deletion.account.name);
            println!("  Transactions removed: {}", deletion.transactions_removed);
            println!("  Savings goals removed: {}", deletion.goals_removed);
        }
    }

    Ok(())
}
