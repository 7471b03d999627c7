//! Expense and income CLI commands
//!
//! Both record kinds share one set of subcommands; the handler is told which
//! list it operates on.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::record::{format_alert, format_record_details, format_record_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Money, RecordKind, RecordPatch};
use crate::services::{ExpenseTracker, SearchQuery};

/// Subcommands shared by `expense` and `income`
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a new record
    Add {
        /// Amount (e.g., "12.50" or "$12.50")
        amount: String,
        /// Category name
        category: String,
        /// Date (YYYY-MM-DD or ISO-8601), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List records in insertion order
    List,
    /// Edit a record
    Edit {
        /// Record ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: String,
    },
    /// Search descriptions and categories
    Search {
        /// Case-insensitive text to look for
        term: Option<String>,
        /// Only records in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Parse a positive amount from user input
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| TrackerError::Validation(format!("Invalid amount: {}", e)))?;
    if !amount.is_positive() {
        return Err(TrackerError::Validation(
            "Amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

/// Parse a date argument, rejecting anything unrecognized
pub fn parse_date_arg(input: &str) -> TrackerResult<chrono::NaiveDateTime> {
    parse_date(input).ok_or_else(|| {
        TrackerError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or an ISO-8601 timestamp",
            input
        ))
    })
}

fn not_found(kind: RecordKind, id: &str) -> TrackerError {
    match kind {
        RecordKind::Expense => TrackerError::expense_not_found(id),
        RecordKind::Income => TrackerError::income_not_found(id),
    }
}

/// Handle an expense or income command
pub fn handle_record_command(
    tracker: &mut ExpenseTracker,
    settings: &Settings,
    kind: RecordKind,
    cmd: RecordCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        RecordCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let date = date.as_deref().map(parse_date_arg).transpose()?;

            match kind {
                RecordKind::Expense => {
                    let added = tracker.add_expense(amount, category, date, description)?;
                    println!("Added expense:");
                    print!("{}", format_record_details(&added.expense, kind, symbol));
                    if let Some(alert) = &added.alert {
                        println!();
                        println!("{}", format_alert(alert, symbol));
                    }
                }
                RecordKind::Income => {
                    let record = tracker.add_income(amount, category, date, description)?;
                    println!("Added income:");
                    print!("{}", format_record_details(&record, kind, symbol));
                }
            }
        }

        RecordCommands::List => {
            let records = match kind {
                RecordKind::Expense => tracker.list_expenses(),
                RecordKind::Income => tracker.list_income(),
            };
            print!(
                "{}",
                format_record_table(records, kind, symbol, &settings.date_display_format)
            );
        }

        RecordCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
        } => {
            let patch = RecordPatch {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                date: date.as_deref().map(parse_date_arg).transpose()?,
                description,
            };

            let found = match kind {
                RecordKind::Expense => tracker.edit_expense(&id, &patch)?,
                RecordKind::Income => tracker.edit_income(&id, &patch)?,
            };
            if !found {
                return Err(not_found(kind, &id));
            }

            if patch.is_empty() {
                println!(
                    "No changes specified. Use --amount, --category, --date, or --description."
                );
            } else {
                println!("Updated {}: {}", kind.label().to_lowercase(), id);
            }
        }

        RecordCommands::Delete { id } => {
            let removed = match kind {
                RecordKind::Expense => tracker.delete_expense(&id)?,
                RecordKind::Income => tracker.delete_income(&id)?,
            };
            if !removed {
                return Err(not_found(kind, &id));
            }
            println!("Deleted {}: {}", kind.label().to_lowercase(), id);
        }

        RecordCommands::Search { term, category } => {
            if kind == RecordKind::Income && category.is_some() {
                eprintln!("Note: income search matches descriptions only; --category is ignored.");
            }
            let query = SearchQuery {
                term,
                category,
                ..SearchQuery::default()
            };
            let results = match kind {
                RecordKind::Expense => tracker.search(&query),
                RecordKind::Income => tracker.search_income(&query),
            };
            print!(
                "{}",
                format_record_table(results, kind, symbol, &settings.date_display_format)
            );
        }
    }

    Ok(())
}
