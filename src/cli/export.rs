//! CLI commands for data export
//!
//! Writes CSV files for transactions, budget usage and savings goals.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    default_filename, export_budgets_csv, export_goals_csv, export_transactions_csv, ExportKind,
};
use crate::models::Month;
use crate::session::Session;
use crate::storage::Backend;

use super::parse_month;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export a month's transactions, transfer legs included
    Transactions {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Output file (defaults to transactions_<month>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a month's budget usage
    Budgets {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Output file (defaults to budgets_<month>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all savings goals
    Goals {
        /// Output file (defaults to savings_goals.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command<B: Backend>(
    session: &Session<B>,
    settings: &Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    let state = session.state();

    match cmd {
        ExportCommands::Transactions { month, output } => {
            let month = parse_month(month.as_deref())?;
            let output = output
                .unwrap_or_else(|| PathBuf::from(default_filename(ExportKind::Transactions, month)));
            export_transactions_csv(state, month, &settings.date_format, create_file(&output)?)?;
            println!("Transactions for {} exported to: {}", month, output.display());
        }

        ExportCommands::Budgets { month, output } => {
            let month = parse_month(month.as_deref())?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(default_filename(ExportKind::Budgets, month)));
            export_budgets_csv(state, month, create_file(&output)?)?;
            println!("Budgets for {} exported to: {}", month, output.display());
        }

        ExportCommands::Goals { output } => {
            let output = output.unwrap_or_else(|| {
                PathBuf::from(default_filename(ExportKind::Goals, Month::current()))
            });
            export_goals_csv(state, &settings.date_format, create_file(&output)?)?;
            println!(
                "Exported {} savings goals to: {}",
                state.savings_goals.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn create_file(output: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
