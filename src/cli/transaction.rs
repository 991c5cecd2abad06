//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! income and expense transactions.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_list, money};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{TransactionId, TransactionKind};
use crate::reports::{filter_transactions, TransactionFilter};
use crate::services::{TransactionInput, TransactionService, TransactionUpdate, TransferService};
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_amount, parse_date, parse_month, resolve_account};

/// Fields shared by `txn income` and `txn expense`
#[derive(Args)]
pub struct RecordArgs {
    /// Source (income) or description (expense)
    pub label: String,
    /// Amount (e.g., "50.00")
    pub amount: String,
    /// Category from the configured set
    #[arg(short, long)]
    pub category: String,
    /// Account name or ID
    #[arg(short, long)]
    pub account: String,
    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Free-form notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record income
    Income(RecordArgs),
    /// Record an expense
    Expense(RecordArgs),
    /// List transactions, newest first
    List {
        /// Only income or expense
        #[arg(short = 't', long)]
        kind: Option<String>,
        /// Text to find in the description or notes
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
        /// Month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Include transfer and savings legs
        #[arg(long)]
        transfers: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New source or description
        #[arg(short, long)]
        label: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// Move to another account
        #[arg(short, long)]
        account: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a transaction and reverse its balance effect
    Delete {
        /// Transaction ID
        id: String,
        /// Remove both legs of the transfer this leg belongs to
        #[arg(long)]
        whole_transfer: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<B: Backend>(
    session: &mut Session<B>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    match cmd {
        TransactionCommands::Income(args) => {
            let input = record_input(session, args)?;
            let txn = TransactionService::new(session).add_income(input)?;
            println!("Recorded income: {} {}", txn.label, money(txn.amount, code));
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::Expense(args) => {
            let input = record_input(session, args)?;
            let txn = TransactionService::new(session).add_expense(input)?;
            println!("Recorded expense: {} {}", txn.label, money(txn.amount, code));
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            kind,
            search,
            category,
            month,
            transfers,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if month.is_some() {
                filter = filter.month(parse_month(month.as_deref())?);
            }
            if transfers {
                filter = filter.include_transfers();
            }

            let matched = filter_transactions(session.state(), &filter);
            println!(
                "{}",
                format_transaction_list(session.state(), &matched, code, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let id = resolve_transaction(session, &id)?;
            if let Some(txn) = session.state().transaction(id) {
                print!("{}", format_transaction_details(session.state(), txn, code));
            }
        }

        TransactionCommands::Edit {
            id,
            label,
            amount,
            date,
            category,
            account,
            notes,
        } => {
            let id = resolve_transaction(session, &id)?;
            let account_id = match account {
                Some(account) => Some(resolve_account(session, &account)?),
                None => None,
            };
            let update = TransactionUpdate {
                label,
                amount: amount
                    .as_deref()
                    .map(|a| parse_amount("amount", a))
                    .transpose()?,
                date: match date {
                    Some(d) => Some(parse_date(Some(d.as_str()))?),
                    None => None,
                },
                category,
                account_id,
                notes,
            };

            let txn = TransactionService::new(session).edit(id, update)?;
            println!("Updated transaction: {}", txn.id);
            println!("  {} {} on {}", txn.label, money(txn.amount, code), txn.date);
        }

        TransactionCommands::Delete { id, whole_transfer } => {
            let id = resolve_transaction(session, &id)?;
            let transfer_id = session.state().transaction(id).and_then(|t| t.transfer_id);

            match transfer_id {
                Some(transfer_id) if whole_transfer => {
                    let legs = TransferService::new(session).delete_transfer(transfer_id)?;
                    println!("Deleted transfer {} ({} legs)", transfer_id, legs.len());
                }
                None if whole_transfer => {
                    return Err(LedgerError::validation(
                        "transaction",
                        "not part of a transfer",
                    ));
                }
                _ => {
                    let txn = TransactionService::new(session).delete(id)?;
                    println!("Deleted transaction: {} ({})", txn.label, money(txn.amount, code));
                }
            }
        }
    }

    Ok(())
}

fn record_input<B: Backend>(session: &mut Session<B>, args: RecordArgs) -> LedgerResult<TransactionInput> {
    Ok(TransactionInput {
        amount: parse_amount("amount", &args.amount)?,
        date: parse_date(args.date.as_deref())?,
        account_id: resolve_account(session, &args.account)?,
        label: args.label,
        category: args.category,
        notes: args.notes,
    })
}

fn resolve_transaction<B: Backend>(session: &mut Session<B>, identifier: &str) -> LedgerResult<TransactionId> {
    TransactionService::new(session).resolve(identifier).map(|t| t.id)
}

fn parse_kind(input: &str) -> LedgerResult<TransactionKind> {
    TransactionKind::parse(input).ok_or_else(|| {
        LedgerError::validation("kind", format!("'{}' is not income or expense", input))
    })
}
