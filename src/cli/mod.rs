//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the tracker.

pub mod budget;
pub mod category;
pub mod record;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use record::{handle_record_command, parse_amount, parse_date_arg, RecordCommands};
pub use report::{handle_report_command, ReportCommands};
