//! Record display formatting
//!
//! Expense and income listings rendered as tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{parse_date, Record, RecordKind};
use crate::services::BudgetAlert;

use super::report::truncate;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl RecordRow {
    fn new(record: &Record, symbol: &str, date_format: &str) -> Self {
        Self {
            id: record.id.to_string(),
            date: display_date(record, date_format),
            category: record.category.clone(),
            amount: record.amount.format_with_symbol(symbol),
            description: truncate(&record.description, 40),
        }
    }
}

/// Render the stored date with the user's format, falling back to the raw day
pub fn display_date(record: &Record, date_format: &str) -> String {
    match parse_date(&record.date) {
        Some(dt) => dt.format(date_format).to_string(),
        None => record.day().to_string(),
    }
}

/// Format a list of records as a table
pub fn format_record_table<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    kind: RecordKind,
    symbol: &str,
    date_format: &str,
) -> String {
    let rows: Vec<RecordRow> = records
        .into_iter()
        .map(|r| RecordRow::new(r, symbol, date_format))
        .collect();

    if rows.is_empty() {
        return match kind {
            RecordKind::Expense => "No expenses found.\n".to_string(),
            RecordKind::Income => "No income found.\n".to_string(),
        };
    }

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

/// Format record details for display
pub fn format_record_details(record: &Record, kind: RecordKind, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}: {}\n", kind.label(), record.id));
    output.push_str(&format!("Date:        {}\n", record.date));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", record.category));
    if !record.description.is_empty() {
        output.push_str(&format!("Description: {}\n", record.description));
    }
    output
}

/// Warning line printed after an expense pushes its category over budget
pub fn format_alert(alert: &BudgetAlert, symbol: &str) -> String {
    format!(
        "WARNING: '{}' budget exceeded! Limit: {}, spent: {} (over by {})",
        alert.category,
        alert.limit.format_with_symbol(symbol),
        alert.spent.format_with_symbol(symbol),
        alert.overage().format_with_symbol(symbol)
    )
}
