use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{
    handle_budget_command, handle_card_command, handle_expense_command, handle_log_command,
    handle_report_command, BudgetCommands, CardCommands, ExpenseCommands, ReportCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::logging::{effective_filter, init_tracing};
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal expense tracker with rolling daily budgets",
    long_about = "Tally records expenses, splits a monthly budget into a daily allowance \
                  that carries unspent money forward, and keeps an eye on credit card \
                  utilization."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget management and daily budget status
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Credit card and payment commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Card(cmd)) => handle_card_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Log { count }) => handle_log_command(&storage, count)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Tally is already initialized at {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                storage.save_all()?;
                println!("Initialized Tally at {}", paths.base_dir().display());
                println!();
                println!("Next steps:");
                println!("  tally budget add 600          # monthly overall budget");
                println!("  tally expense add 12.50 Lunch -c Food");
                println!("  tally budget status");
            }
        }
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Log filter:      {}",
                effective_filter(&settings.log_filter)
            );
        }
        None => {
            println!("Tally - expense tracking with rolling daily budgets");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
