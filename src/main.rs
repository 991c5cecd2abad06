use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use homeledger::cli::{
    handle_account_command, handle_budget_command, handle_dashboard_command,
    handle_export_command, handle_goal_command, handle_register_command, handle_report_command,
    handle_transaction_command, handle_transfer_command,
};
use homeledger::config::{LedgerPaths, Settings};
use homeledger::services::UserService;
use homeledger::session::Session;
use homeledger::storage::{open_file_backend, EntityStore, FileBackend};

/// Environment variable overriding the log filter
const LOG_ENV: &str = "LEDGER_LOG";
/// Environment variable holding the password for non-interactive use
const PASSWORD_ENV: &str = "LEDGER_PASSWORD";

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal finance ledger",
    long_about = "HomeLedger tracks accounts, income and expenses, monthly budgets \
                  and savings goals, keeping every balance consistent with its \
                  transaction history."
)]
struct Cli {
    /// Email of the signed-in user
    #[arg(short, long, global = true, env = "LEDGER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register {
        /// Display name
        name: String,
        /// Email used to sign in
        email: String,
    },

    /// Account management commands
    #[command(subcommand)]
    Account(homeledger::cli::AccountCommands),

    /// Income and expense commands
    #[command(subcommand, alias = "txn")]
    Transaction(homeledger::cli::TransactionCommands),

    /// Move money between two accounts
    Transfer(homeledger::cli::TransferArgs),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(homeledger::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(homeledger::cli::GoalCommands),

    /// Monthly summary with recent transactions
    Dashboard {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Reports
    #[command(subcommand)]
    Report(homeledger::cli::ReportCommands),

    /// Export data to CSV
    #[command(subcommand)]
    Export(homeledger::cli::ExportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("HomeLedger - personal finance ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger register <NAME> <EMAIL>' to get started.");
            return Ok(());
        }
    };

    match &command {
        Commands::Config => {
            println!("HomeLedger Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency:    {}", settings.currency_code);
            println!("  Date format: {}", settings.date_format);
            println!("  Log level:   {}", settings.log_level);
            println!("  Income categories:  {}", settings.income_categories.join(", "));
            println!("  Expense categories: {}", settings.expense_categories.join(", "));
            return Ok(());
        }
        Commands::Register { name, email } => {
            let mut backend = open_file_backend(&paths)?;
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            let password = read_password()?;
            handle_register_command(&mut backend, name, email, &password)?;
            return Ok(());
        }
        _ => {}
    }

    let mut session = sign_in(&paths, &settings, cli.user.as_deref())?;

    match command {
        Commands::Account(cmd) => handle_account_command(&mut session, &settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&mut session, &settings, cmd)?,
        Commands::Transfer(args) => handle_transfer_command(&mut session, &settings, args)?,
        Commands::Budget(cmd) => handle_budget_command(&mut session, &settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&mut session, &settings, cmd)?,
        Commands::Dashboard { month } => handle_dashboard_command(&session, &settings, month)?,
        Commands::Report(cmd) => handle_report_command(&session, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&session, &settings, cmd)?,
        Commands::Config | Commands::Register { .. } => {}
    }

    Ok(())
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_password() -> Result<String> {
    match std::env::var(PASSWORD_ENV) {
        Ok(password) => Ok(password),
        Err(_) => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}

/// Authenticate and open the user's ledger
fn sign_in(
    paths: &LedgerPaths,
    settings: &Settings,
    email: Option<&str>,
) -> Result<Session<FileBackend>> {
    let Some(email) = email else {
        bail!("No user selected. Pass --user <EMAIL> or set LEDGER_USER.");
    };

    let mut backend = open_file_backend(paths)?;
    let password = read_password()?;
    let user = UserService::new(&mut backend).authenticate(email, &password)?;

    Ok(Session::open(
        user.id,
        EntityStore::new(backend),
        settings.categories(),
    ))
}
