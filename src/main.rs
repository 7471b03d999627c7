use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{
    handle_budget_command, handle_category_command, handle_record_command, handle_report_command,
    BudgetCommands, CategoryCommands, RecordCommands, ReportCommands,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::display::report::{format_header, separator};
use expense_tracker::models::RecordKind;
use expense_tracker::services::ExpenseTracker;
use expense_tracker::storage::ProfileStore;

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Terminal-based personal expense and income tracker",
    long_about = "Track expenses and income per user, set monthly and per-category \
                  budget limits, and see where the money went. Several users can \
                  share one data file."
)]
struct Cli {
    /// Profile to operate on
    #[arg(short, long, global = true, env = "EXPENSE_TRACKER_USER")]
    user: Option<String>,

    /// Use this profiles file instead of the one in the data directory
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Profile(ProfileCommands),
}

/// Commands that operate on one user's profile
#[derive(Subcommand)]
enum ProfileCommands {
    /// Expense management commands
    #[command(subcommand)]
    Expense(RecordCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(RecordCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Monthly budget against total spending
    Summary,

    /// Recent changes to this profile
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_tracker=warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let data_file = cli
        .data_file
        .clone()
        .unwrap_or_else(|| paths.profiles_file());

    match cli.command {
        Some(Commands::Config) => print_config(&paths, &settings, &data_file),
        Some(Commands::Profile(command)) => {
            run_profile_command(command, cli.user, &paths, &settings, data_file)?
        }
        None => {
            println!("Expense Tracker - personal expenses and income");
            println!();
            println!("Run 'tracker --help' for usage information.");
        }
    }

    Ok(())
}

fn run_profile_command(
    command: ProfileCommands,
    user: Option<String>,
    paths: &TrackerPaths,
    settings: &Settings,
    data_file: PathBuf,
) -> Result<()> {
    let user = user
        .or_else(|| settings.default_user.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| {
            anyhow!(
                "No user selected. Pass --user NAME, set EXPENSE_TRACKER_USER, \
                 or set default_user in {}",
                paths.settings_file().display()
            )
        })?;

    let audit_logger = AuditLogger::new(paths.audit_log());
    let mut tracker = ExpenseTracker::open(&user, ProfileStore::new(data_file))?;
    if settings.audit_enabled {
        tracker = tracker.with_audit(audit_logger.clone());
    }

    match command {
        ProfileCommands::Expense(cmd) => {
            handle_record_command(&mut tracker, settings, RecordKind::Expense, cmd)?;
        }
        ProfileCommands::Income(cmd) => {
            handle_record_command(&mut tracker, settings, RecordKind::Income, cmd)?;
        }
        ProfileCommands::Category(cmd) => {
            handle_category_command(&mut tracker, cmd)?;
        }
        ProfileCommands::Budget(cmd) => {
            handle_budget_command(&mut tracker, settings, cmd)?;
        }
        ProfileCommands::Report(cmd) => {
            handle_report_command(&tracker, settings, cmd)?;
        }
        ProfileCommands::Summary => {
            print!(
                "{}",
                tracker
                    .monthly_summary()
                    .format_terminal(&settings.currency_symbol)
            );
        }
        ProfileCommands::History { limit } => {
            let entries = if audit_logger.exists() {
                audit_logger.read_recent_for(tracker.user_name(), limit)?
            } else {
                Vec::new()
            };

            if entries.is_empty() {
                println!("No history recorded for '{}'.", tracker.user_name());
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

fn print_config(paths: &TrackerPaths, settings: &Settings, data_file: &std::path::Path) {
    println!("{}", format_header("Expense Tracker Configuration", 40));
    println!("{}", separator(40));
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Profiles file:  {}", data_file.display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!(
        "  Default user:    {}",
        settings.default_user.as_deref().unwrap_or("(none)")
    );
    println!("  Audit enabled:   {}", settings.audit_enabled);
    println!("  Date format:     {}", settings.date_display_format);
}
