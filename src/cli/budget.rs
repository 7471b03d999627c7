//! Budget CLI commands
//!
//! Implements CLI commands for the monthly limit, per-category limits and the
//! status overview.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::services::ExpenseTracker;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the overall monthly limit (0 removes it)
    Monthly {
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
    },

    /// Set the limit for one category (0 removes it)
    Set {
        /// Category name
        category: String,
        /// Amount
        amount: String,
    },

    /// Show spending against every limit
    Status,
}

fn parse_limit(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| TrackerError::Validation(format!("Invalid amount: {}", e)))
}

/// Handle a budget command
pub fn handle_budget_command(
    tracker: &mut ExpenseTracker,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Monthly { amount } => {
            let amount = parse_limit(&amount)?;
            tracker.set_monthly_budget(amount)?;
            if amount.is_zero() {
                println!("Removed monthly budget");
            } else {
                println!("Monthly budget set to {}", amount.format_with_symbol(symbol));
            }
        }

        BudgetCommands::Set { category, amount } => {
            let amount = parse_limit(&amount)?;
            tracker.set_category_budget(&category, amount)?;
            if amount.is_zero() {
                println!("Removed budget for '{}'", category.trim());
            } else {
                println!(
                    "Budget for '{}' set to {}",
                    category.trim(),
                    amount.format_with_symbol(symbol)
                );
            }
        }

        BudgetCommands::Status => {
            print!("{}", tracker.budget_status().format_terminal(symbol));
        }
    }

    Ok(())
}
