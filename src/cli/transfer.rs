//! CLI command handler for account transfers
//!
//! Handles transferring funds between accounts, creating linked
//! transaction pairs that maintain balance consistency.

use clap::Args;

use crate::config::Settings;
use crate::display::money;
use crate::error::LedgerResult;
use crate::services::{TransferInput, TransferService};
use crate::session::Session;
use crate::storage::Backend;

use super::{parse_amount, parse_date, resolve_account};

/// Arguments of `ledger transfer`
#[derive(Args)]
pub struct TransferArgs {
    /// Source account name or ID
    pub from: String,
    /// Destination account name or ID
    pub to: String,
    /// Amount to move
    pub amount: String,
    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Notes copied onto both legs
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

/// Handle the transfer command
pub fn handle_transfer_command<B: Backend>(
    session: &mut Session<B>,
    settings: &Settings,
    args: TransferArgs,
) -> LedgerResult<()> {
    let code = settings.currency_code.as_str();

    let amount = parse_amount("amount", &args.amount)?;
    let date = parse_date(args.date.as_deref())?;
    let from_account_id = resolve_account(session, &args.from)?;
    let to_account_id = resolve_account(session, &args.to)?;

    let result = TransferService::new(session).transfer(TransferInput {
        from_account_id,
        to_account_id,
        amount,
        date,
        notes: args.notes,
    })?;

    println!("Transfer created: {}", result.transfer_id);
    println!(
        "  {}  -{}",
        result.from_transaction.label,
        money(result.from_transaction.amount, code)
    );
    println!(
        "  {}  +{}",
        result.to_transaction.label,
        money(result.to_transaction.amount, code)
    );
    println!("  Date: {}", date);

    Ok(())
}
