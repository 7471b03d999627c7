//! Period Report
//!
//! Expenses whose date starts with a given prefix, e.g. "2025" or "2025-03".

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Record};
use crate::services::ExpenseTracker;

#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub prefix: String,
    pub expenses: Vec<Record>,
    pub total: Money,
}

impl PeriodReport {
    pub fn generate(tracker: &ExpenseTracker, prefix: &str) -> TrackerResult<Self> {
        let prefix = prefix.trim();
        if !is_period_prefix(prefix) {
            return Err(TrackerError::Validation(format!(
                "Invalid period '{}'. Use YYYY or YYYY-MM",
                prefix
            )));
        }

        let expenses: Vec<Record> = tracker
            .list_expenses()
            .iter()
            .filter(|e| e.date.starts_with(prefix))
            .cloned()
            .collect();
        let total = expenses.iter().map(|e| e.amount).sum();

        Ok(Self {
            prefix: prefix.to_string(),
            expenses,
            total,
        })
    }
}

fn is_period_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.len() {
        4 => bytes.iter().all(u8::is_ascii_digit),
        7 => {
            bytes[..4].iter().all(u8::is_ascii_digit)
                && bytes[4] == b'-'
                && bytes[5..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;
    use crate::storage::ProfileStore;
    use tempfile::TempDir;

    #[test]
    fn test_filters_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = ProfileStore::new(temp_dir.path().join("profiles.json"));
        let mut tracker = ExpenseTracker::open("alice", store).unwrap();

        let dated = [
            ("2025-03-02", 100),
            ("2025-03-28", 250),
            ("2025-04-01", 999),
            ("2024-03-05", 1),
        ];
        for (date, cents) in dated {
            tracker
                .add_expense(Money::from_cents(cents), "Food", parse_date(date), None)
                .unwrap();
        }

        let march = PeriodReport::generate(&tracker, "2025-03").unwrap();
        assert_eq!(march.expenses.len(), 2);
        assert_eq!(march.total.cents(), 350);

        let year = PeriodReport::generate(&tracker, "2025").unwrap();
        assert_eq!(year.expenses.len(), 3);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        assert!(is_period_prefix("2025"));
        assert!(is_period_prefix("2025-11"));
        assert!(!is_period_prefix("25-11"));
        assert!(!is_period_prefix("2025/11"));
        assert!(!is_period_prefix(""));
    }
}
