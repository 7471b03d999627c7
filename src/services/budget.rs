//! Budget evaluation
//!
//! Compares recorded spending with the profile's limits. Everything here is a
//! pure read over the expense list; nothing is persisted.
//!
//! Totals are all-time sums. The "monthly" limit is compared against every
//! expense ever recorded, not just the current month's.

use std::fmt;

use crate::models::record::FALLBACK_CATEGORY;
use crate::models::{Budgets, Money, Record};

/// Raised when a category's cumulative spend passes its limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAlert {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
}

impl BudgetAlert {
    /// How far spending is past the limit
    pub fn overage(&self) -> Money {
        self.spent - self.limit
    }
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You have EXCEEDED your budget for '{}'! Limit: {} | Spent: {}",
            self.category, self.limit, self.spent
        )
    }
}

/// Classification of one category's spend against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    /// More than 90% of the limit is used
    NearLimit,
    /// Spend exceeds the limit by the given amount
    Over(Money),
}

impl BudgetStatus {
    pub fn classify(spent: Money, limit: Money) -> Self {
        if spent > limit {
            Self::Over(spent - limit)
        } else if i128::from(spent.cents()) * 10 > i128::from(limit.cents()) * 9 {
            Self::NearLimit
        } else {
            Self::Ok
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Self::Over(_))
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NearLimit => write!(f, "Near Limit"),
            Self::Over(by) => write!(f, "OVER by {}", by.format_plain()),
        }
    }
}

/// Total spend compared with the monthly limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyStanding {
    /// No monthly limit configured
    NoLimit,
    Within { remaining: Money },
    Over { by: Money },
}

/// One configured category limit with its current spend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBudgetLine {
    pub category: String,
    pub spent: Money,
    pub limit: Money,
    pub status: BudgetStatus,
}

/// Full budget status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatusReport {
    pub total_spent: Money,
    pub monthly_limit: Money,
    pub monthly: MonthlyStanding,
    pub categories: Vec<CategoryBudgetLine>,
}

impl BudgetStatusReport {
    /// Whether any category is over its limit
    pub fn has_category_alerts(&self) -> bool {
        self.categories.iter().any(|line| line.status.is_over())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Budget Status\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent: {} / Monthly Limit: {}\n",
            self.total_spent.format_with_symbol(symbol),
            self.monthly_limit.format_with_symbol(symbol)
        ));

        match self.monthly {
            MonthlyStanding::Over { by } => output.push_str(&format!(
                "  WARNING: You are OVER your monthly budget by {}!\n",
                by.format_with_symbol(symbol)
            )),
            MonthlyStanding::Within { remaining } => output.push_str(&format!(
                "  Within your monthly budget. Remaining: {}\n",
                remaining.format_with_symbol(symbol)
            )),
            MonthlyStanding::NoLimit => output.push_str("  No monthly limit set.\n"),
        }

        output.push_str("\nCategory Breakdown\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("(No category budgets set yet)\n");
            return output;
        }

        for line in &self.categories {
            output.push_str(&format!(
                "{}: Spent {} / Limit {} -> {}\n",
                line.category,
                line.spent.format_with_symbol(symbol),
                line.limit.format_with_symbol(symbol),
                line.status
            ));
        }

        if !self.has_category_alerts() {
            output.push_str("\nAll category budgets are healthy.\n");
        }

        output
    }
}

/// Read-only view over expenses and limits
pub struct BudgetEvaluator<'a> {
    expenses: &'a [Record],
    budgets: &'a Budgets,
}

impl<'a> BudgetEvaluator<'a> {
    pub fn new(expenses: &'a [Record], budgets: &'a Budgets) -> Self {
        Self { expenses, budgets }
    }

    /// Sum of every expense
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Sum of expenses whose category is exactly `category`
    pub fn category_spent(&self, category: &str) -> Money {
        self.expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum()
    }

    /// Check a category after an expense was added to it
    pub fn check_category(&self, category: &str) -> Option<BudgetAlert> {
        let limit = self.budgets.category_limit(category)?;
        let spent = self.category_spent(category);

        (spent > limit).then(|| BudgetAlert {
            category: category.to_string(),
            limit,
            spent,
        })
    }

    /// Compare spending with the monthly and per-category limits
    ///
    /// Expenses without a category count towards "Other". Categories whose
    /// limit is zero are treated as unbudgeted and left out.
    pub fn status_report(&self) -> BudgetStatusReport {
        let total_spent = self.total_spent();
        let monthly_limit = self.budgets.monthly;

        let monthly = match self.budgets.monthly_limit() {
            None => MonthlyStanding::NoLimit,
            Some(limit) if total_spent > limit => MonthlyStanding::Over {
                by: total_spent - limit,
            },
            Some(limit) => MonthlyStanding::Within {
                remaining: limit - total_spent,
            },
        };

        let categories = self
            .budgets
            .categories
            .iter()
            .filter(|(_, limit)| limit.is_positive())
            .map(|(category, &limit)| {
                let spent = self.reporting_spent(category);
                CategoryBudgetLine {
                    category: category.clone(),
                    spent,
                    limit,
                    status: BudgetStatus::classify(spent, limit),
                }
            })
            .collect();

        BudgetStatusReport {
            total_spent,
            monthly_limit,
            monthly,
            categories,
        }
    }

    fn reporting_spent(&self, category: &str) -> Money {
        self.expenses
            .iter()
            .filter(|e| {
                let name = if e.category.is_empty() {
                    FALLBACK_CATEGORY
                } else {
                    e.category.as_str()
                };
                name == category
            })
            .map(|e| e.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(cents: i64, category: &str) -> Record {
        Record::create(Money::from_cents(cents), category, None, None)
    }

    fn budgets(monthly: i64, limits: &[(&str, i64)]) -> Budgets {
        Budgets {
            monthly: Money::from_cents(monthly),
            categories: limits
                .iter()
                .map(|(c, l)| (c.to_string(), Money::from_cents(*l)))
                .collect(),
        }
    }

    #[test]
    fn test_classification_thresholds() {
        let limit = Money::from_cents(10000);

        assert_eq!(
            BudgetStatus::classify(Money::from_cents(9500), limit),
            BudgetStatus::NearLimit
        );
        assert_eq!(
            BudgetStatus::classify(Money::from_cents(10100), limit).to_string(),
            "OVER by 1.00"
        );
        assert_eq!(
            BudgetStatus::classify(Money::from_cents(5000), limit),
            BudgetStatus::Ok
        );
        // Exactly 90% and exactly the limit are not flagged
        assert_eq!(
            BudgetStatus::classify(Money::from_cents(9000), limit),
            BudgetStatus::Ok
        );
        assert_eq!(
            BudgetStatus::classify(limit, limit),
            BudgetStatus::NearLimit
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BudgetStatus::Ok.to_string(), "OK");
        assert_eq!(BudgetStatus::NearLimit.to_string(), "Near Limit");
    }

    #[test]
    fn test_check_category_alerts_only_when_exceeded() {
        let expenses = vec![expense(5000, "Food"), expense(6000, "Food"), expense(900, "Fun")];
        let budgets = budgets(0, &[("Food", 10000), ("Fun", 1000)]);
        let evaluator = BudgetEvaluator::new(&expenses, &budgets);

        let alert = evaluator.check_category("Food").unwrap();
        assert_eq!(alert.spent, Money::from_cents(11000));
        assert_eq!(alert.limit, Money::from_cents(10000));
        assert_eq!(alert.overage(), Money::from_cents(1000));

        assert!(evaluator.check_category("Fun").is_none());
        assert!(evaluator.check_category("Transport").is_none());
    }

    #[test]
    fn test_zero_limit_means_unbudgeted() {
        let expenses = vec![expense(5000, "Food")];
        let budgets = budgets(0, &[("Food", 0)]);
        let evaluator = BudgetEvaluator::new(&expenses, &budgets);

        assert!(evaluator.check_category("Food").is_none());
        let report = evaluator.status_report();
        assert_eq!(report.monthly, MonthlyStanding::NoLimit);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn test_status_report() {
        let expenses = vec![
            expense(9500, "Food"),
            expense(2000, "Fun"),
            expense(500, ""),
        ];
        let budgets = budgets(10000, &[("Food", 10000), ("Fun", 1000), ("Other", 10000)]);
        let report = BudgetEvaluator::new(&expenses, &budgets).status_report();

        assert_eq!(report.total_spent, Money::from_cents(12000));
        assert_eq!(
            report.monthly,
            MonthlyStanding::Over {
                by: Money::from_cents(2000)
            }
        );

        let by_name = |name: &str| {
            report
                .categories
                .iter()
                .find(|l| l.category == name)
                .unwrap()
                .status
        };
        assert_eq!(by_name("Food"), BudgetStatus::NearLimit);
        assert_eq!(by_name("Fun"), BudgetStatus::Over(Money::from_cents(1000)));
        assert_eq!(by_name("Other"), BudgetStatus::Ok);
        assert!(report.has_category_alerts());
    }

    #[test]
    fn test_monthly_headroom() {
        let expenses = vec![expense(2500, "Food")];
        let budgets = budgets(10000, &[]);
        let report = BudgetEvaluator::new(&expenses, &budgets).status_report();

        assert_eq!(
            report.monthly,
            MonthlyStanding::Within {
                remaining: Money::from_cents(7500)
            }
        );
        let text = report.format_terminal("$");
        assert!(text.contains("Remaining: $75.00"));
        assert!(text.contains("(No category budgets set yet)"));
    }

    #[test]
    fn test_format_terminal_lines() {
        let expenses = vec![expense(10100, "Food")];
        let budgets = budgets(0, &[("Food", 10000)]);
        let text = BudgetEvaluator::new(&expenses, &budgets)
            .status_report()
            .format_terminal("$");

        assert!(text.contains("Food: Spent $101.00 / Limit $100.00 -> OVER by 1.00"));
        assert!(!text.contains("healthy"));
    }
}
