//! Timeline Report
//!
//! Expenses and income merged into one list, newest first. Dates are compared
//! as stored strings, which orders correctly for ISO-8601 timestamps.

use crate::models::{Money, Record, RecordKind};
use crate::services::ExpenseTracker;

use crate::display::report::truncate;

/// One row of the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub date: String,
    pub kind: RecordKind,
    pub category: String,
    /// Signed amount: expenses are negative
    pub amount: Money,
    pub description: String,
}

impl TimelineEntry {
    fn from_record(record: &Record, kind: RecordKind) -> Self {
        let amount = match kind {
            RecordKind::Expense => -record.amount,
            RecordKind::Income => record.amount,
        };
        Self {
            date: record.date.clone(),
            kind,
            category: record.category.clone(),
            amount,
            description: record.description.clone(),
        }
    }

    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimelineReport {
    pub entries: Vec<TimelineEntry>,
}

impl TimelineReport {
    pub fn generate(tracker: &ExpenseTracker) -> Self {
        let mut entries: Vec<TimelineEntry> = tracker
            .list_expenses()
            .iter()
            .map(|r| TimelineEntry::from_record(r, RecordKind::Expense))
            .chain(
                tracker
                    .list_income()
                    .iter()
                    .map(|r| TimelineEntry::from_record(r, RecordKind::Income)),
            )
            .collect();

        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Self { entries }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.entries.is_empty() {
            return "No transactions recorded.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:<12} | {:<8} | {:<12} | {:>12} | {}\n",
            "Date", "Type", "Category", "Amount", "Description"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<12} | {:<8} | {:<12} | {:>12} | {}\n",
                entry.day(),
                entry.kind,
                truncate(&entry.category, 12),
                entry.amount.format_with_symbol(symbol),
                entry.description
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use crate::storage::ProfileStore;
    use tempfile::TempDir;

    #[test]
    fn test_merged_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::new(temp_dir.path().join("profiles.json"));
        let mut tracker = ExpenseTracker::open("alice", store).unwrap();

        tracker
            .add_expense(Money::from_cents(500), "Food", parse_date("2025-01-02"), None)
            .unwrap();
        tracker
            .add_income(Money::from_cents(90000), "Salary", parse_date("2025-01-03"), None)
            .unwrap();
        tracker
            .add_expense(Money::from_cents(1500), "Fun", parse_date("2025-01-01"), None)
            .unwrap();

        let report = TimelineReport::generate(&tracker);
        let kinds: Vec<_> = report.entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Income, RecordKind::Expense, RecordKind::Expense]
        );
        assert_eq!(report.entries[1].amount.cents(), -500);
        assert_eq!(report.entries[2].day(), "2025-01-01");

        let text = report.format_terminal("$");
        assert!(text.contains("INCOME"));
        assert!(text.contains("-$15.00"));
    }
}
