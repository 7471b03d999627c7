//! CLI commands for reports

use clap::Subcommand;

use crate::config::Settings;
use crate::display::record::format_record_table;
use crate::error::TrackerResult;
use crate::models::RecordKind;
use crate::reports::{
    BalanceReport, CategoryTotalsReport, ExpensesByCategoryReport, PeriodReport, TimelineReport,
};
use crate::services::ExpenseTracker;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total income, total expenses and the net balance
    Balance,

    /// Every expense, sorted by category
    #[command(name = "by-category")]
    ByCategory,

    /// Expenses and income merged, newest first
    Timeline,

    /// Expenses within a year or month
    Period {
        /// Period prefix ("2025" or "2025-03")
        period: String,
    },

    /// Spending totals per category, largest first
    Totals,
}

/// Handle a report command
pub fn handle_report_command(
    tracker: &ExpenseTracker,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_display_format.as_str();

    match cmd {
        ReportCommands::Balance => {
            print!("{}", BalanceReport::generate(tracker).format_terminal(symbol));
        }
        ReportCommands::ByCategory => {
            let report = ExpensesByCategoryReport::generate(tracker);
            print!(
                "{}",
                format_record_table(&report.expenses, RecordKind::Expense, symbol, date_format)
            );
        }
        ReportCommands::Timeline => {
            print!("{}", TimelineReport::generate(tracker).format_terminal(symbol));
        }
        ReportCommands::Period { period } => {
            let report = PeriodReport::generate(tracker, &period)?;
            println!("Expenses for {}", report.prefix);
            print!(
                "{}",
                format_record_table(&report.expenses, RecordKind::Expense, symbol, date_format)
            );
            println!("Total: {}", report.total.format_with_symbol(symbol));
        }
        ReportCommands::Totals => {
            print!(
                "{}",
                CategoryTotalsReport::generate(tracker).format_terminal(symbol)
            );
        }
    }

    Ok(())
}
