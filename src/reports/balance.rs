//! Global Balance Report
//!
//! Total income against total expenses over the whole profile.

use crate::models::Money;
use crate::services::ExpenseTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceReport {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses; negative means debt
    pub balance: Money,
}

impl BalanceReport {
    pub fn generate(tracker: &ExpenseTracker) -> Self {
        let total_income: Money = tracker.list_income().iter().map(|r| r.amount).sum();
        let total_expenses: Money = tracker.list_expenses().iter().map(|r| r.amount).sum();

        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Global Financial Report\n");
        output.push_str(&"=".repeat(35));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   +{}\n",
            self.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Expenses: -{}\n",
            self.total_expenses.format_with_symbol(symbol)
        ));
        output.push_str(&"-".repeat(35));
        output.push('\n');

        let standing = if self.balance.is_negative() {
            "Negative/Debt"
        } else {
            "Positive"
        };
        output.push_str(&format!(
            "Current Balance: {} ({})\n",
            self.balance.format_with_symbol(symbol),
            standing
        ));

        output
    }
}
