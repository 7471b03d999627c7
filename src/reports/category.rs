//! Category Reports
//!
//! Expenses grouped by category: the full list sorted by category, and the
//! per-category totals (the figures a spending chart would plot).

use std::collections::HashMap;

use crate::models::{Money, Record};
use crate::services::ExpenseTracker;

/// Every expense, ordered by category name
#[derive(Debug, Clone, Default)]
pub struct ExpensesByCategoryReport {
    pub expenses: Vec<Record>,
}

impl ExpensesByCategoryReport {
    pub fn generate(tracker: &ExpenseTracker) -> Self {
        let mut expenses = tracker.list_expenses().to_vec();
        expenses.sort_by(|a, b| a.category.cmp(&b.category));
        Self { expenses }
    }
}

/// Spending total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Share of all spending, 0-100
    pub percentage: f64,
}

/// Per-category spending, largest first
#[derive(Debug, Clone, Default)]
pub struct CategoryTotalsReport {
    pub rows: Vec<CategoryTotal>,
    pub total_spending: Money,
}

impl CategoryTotalsReport {
    pub fn generate(tracker: &ExpenseTracker) -> Self {
        let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();
        for expense in tracker.list_expenses() {
            let entry = totals
                .entry(expense.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let total_spending: Money = totals.values().map(|(total, _)| *total).sum();

        let mut rows: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_string(),
                total,
                count,
                percentage: if total_spending.is_zero() {
                    0.0
                } else {
                    total.cents() as f64 / total_spending.cents() as f64 * 100.0
                },
            })
            .collect();

        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Self {
            rows,
            total_spending,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        if self.rows.is_empty() {
            return "No data to report yet.\n".to_string();
        }

        let max = self.rows.first().map(|r| r.total.cents()).unwrap_or(0) as f64;
        let mut output = String::new();

        output.push_str(&format!(
            "{:<20} {:>12} {:>6} {:>7}  \n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>12} {:>6} {:>7}  {}\n",
                crate::display::report::truncate(&row.category, 20),
                row.total.format_with_symbol(symbol),
                row.count,
                crate::display::report::format_percentage(row.percentage),
                crate::display::report::format_bar(row.total.cents() as f64, max, 20)
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12}\n",
            "TOTAL SPENDING",
            self.total_spending.format_with_symbol(symbol)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ProfileStore;
    use tempfile::TempDir;

    fn tracker_with(expenses: &[(i64, &str)]) -> (TempDir, ExpenseTracker) {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::new(temp_dir.path().join("profiles.json"));
        let mut tracker = ExpenseTracker::open("alice", store).unwrap();
        for (cents, category) in expenses {
            tracker
                .add_expense(Money::from_cents(*cents), *category, None, None)
                .unwrap();
        }
        (temp_dir, tracker)
    }

    #[test]
    fn test_sorted_by_category_is_stable() {
        let (_temp_dir, tracker) =
            tracker_with(&[(100, "Transport"), (200, "Food"), (300, "Transport"), (400, "Food")]);

        let report = ExpensesByCategoryReport::generate(&tracker);
        let cents: Vec<_> = report.expenses.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(cents, vec![200, 400, 100, 300]);
    }

    #[test]
    fn test_category_totals() {
        let (_temp_dir, tracker) = tracker_with(&[(2500, "Food"), (2500, "Food"), (5000, "Rent")]);

        let report = CategoryTotalsReport::generate(&tracker);
        assert_eq!(report.total_spending.cents(), 10000);
        assert_eq!(report.rows.len(), 2);
        // Equal totals fall back to name order
        assert_eq!(report.rows[0].category, "Food");
        assert_eq!(report.rows[0].count, 2);
        assert!((report.rows[1].percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_totals() {
        let (_temp_dir, tracker) = tracker_with(&[]);
        let report = CategoryTotalsReport::generate(&tracker);
        assert!(report.rows.is_empty());
        assert_eq!(report.format_terminal("$"), "No data to report yet.\n");
    }
}
