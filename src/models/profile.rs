//! Per-user profile
//!
//! A profile is everything the tracker knows about one user: both record
//! lists, the two category lists and the budget limits. It is stored as one
//! element of the shared profiles array.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::money::Money;
use super::record::{Record, RecordKind};

/// Expense categories a new profile starts with
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 5] =
    ["Food", "Transport", "Entertainment", "Utilities", "Other"];

/// Income categories a new profile starts with
pub const DEFAULT_INCOME_CATEGORIES: [&str; 3] = ["Salary", "Freelance", "Gift"];

/// Spending limits; zero means "no limit configured"
///
/// Decoding never fails: a limit that is null or not a number reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Budgets {
    pub monthly: Money,
    pub categories: BTreeMap<String, Money>,
}

fn lenient_limit(value: &Value) -> Money {
    if value.is_null() {
        return Money::zero();
    }
    Money::deserialize(value).unwrap_or_else(|_| {
        tracing::warn!(limit = %value, "unreadable budget limit treated as zero");
        Money::zero()
    })
}

impl From<Value> for Budgets {
    fn from(value: Value) -> Self {
        let monthly = value.get("monthly").map(lenient_limit).unwrap_or_default();
        let categories = match value.get("categories") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(name, limit)| (name.clone(), lenient_limit(limit)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Self {
            monthly,
            categories,
        }
    }
}

impl Budgets {
    /// Configured limit for a category, if it is positive
    pub fn category_limit(&self, category: &str) -> Option<Money> {
        self.categories
            .get(category)
            .copied()
            .filter(Money::is_positive)
    }

    /// Monthly limit, if it is positive
    pub fn monthly_limit(&self) -> Option<Money> {
        Some(self.monthly).filter(Money::is_positive)
    }
}

/// One user's complete financial record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default, deserialize_with = "lenient_records")]
    pub expenses: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub income: Vec<Record>,
    #[serde(
        default = "default_expense_categories",
        deserialize_with = "lenient_expense_categories"
    )]
    pub categories: Vec<String>,
    #[serde(
        default = "default_income_categories",
        deserialize_with = "lenient_income_categories"
    )]
    pub income_categories: Vec<String>,
    #[serde(default)]
    pub budgets: Budgets,
}

fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_income_categories() -> Vec<String> {
    DEFAULT_INCOME_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn lenient_records<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Record>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(Record::from).collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(value = %other, "record list is not an array, treating as empty");
            Vec::new()
        }
    })
}

fn string_items(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn lenient_expense_categories<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(string_items(Value::deserialize(deserializer)?).unwrap_or_else(default_expense_categories))
}

fn lenient_income_categories<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(string_items(Value::deserialize(deserializer)?).unwrap_or_else(default_income_categories))
}

impl UserProfile {
    /// Fresh profile with default categories and no limits
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            expenses: Vec::new(),
            income: Vec::new(),
            categories: default_expense_categories(),
            income_categories: default_income_categories(),
            budgets: Budgets::default(),
        }
    }

    pub fn records_mut(&mut self, kind: RecordKind) -> &mut Vec<Record> {
        match kind {
            RecordKind::Expense => &mut self.expenses,
            RecordKind::Income => &mut self.income,
        }
    }

    pub fn category_list_mut(&mut self, kind: RecordKind) -> &mut Vec<String> {
        match kind {
            RecordKind::Expense => &mut self.categories,
            RecordKind::Income => &mut self.income_categories,
        }
    }
}
