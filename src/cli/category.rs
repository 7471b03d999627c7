//! Category CLI commands

use clap::Subcommand;

use crate::error::{TrackerError, TrackerResult};
use crate::models::RecordKind;
use crate::services::ExpenseTracker;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Show income categories instead of expense categories
        #[arg(long)]
        income: bool,
    },

    /// Add a category
    Add {
        /// Category name
        name: String,
        #[arg(long)]
        income: bool,
    },

    /// Remove a category (existing records keep their category text)
    Remove {
        /// Category name
        name: String,
        #[arg(long)]
        income: bool,
    },
}

fn kind_for(income: bool) -> RecordKind {
    if income {
        RecordKind::Income
    } else {
        RecordKind::Expense
    }
}

/// Handle a category command
pub fn handle_category_command(
    tracker: &mut ExpenseTracker,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    match cmd {
        CategoryCommands::List { income } => {
            let names = match kind_for(income) {
                RecordKind::Expense => tracker.categories(),
                RecordKind::Income => tracker.income_categories(),
            };
            if names.is_empty() {
                println!("No categories defined.");
            }
            for name in names {
                println!("  {}", name);
            }
        }

        CategoryCommands::Add { name, income } => {
            tracker.add_category(kind_for(income), &name)?;
            println!("Added category: {}", name.trim());
        }

        CategoryCommands::Remove { name, income } => {
            if !tracker.remove_category(kind_for(income), &name)? {
                return Err(TrackerError::category_not_found(name));
            }
            println!("Removed category: {}", name);
        }
    }

    Ok(())
}
