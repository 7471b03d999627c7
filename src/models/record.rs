//! Expense and income records
//!
//! Expenses and income share one shape, so both are represented by
//! [`Record`]; [`RecordKind`] tells them apart where it matters (reports,
//! audit entries, error messages).
//!
//! Loading is forgiving: a stored record with missing or oddly
//! typed fields is coerced into something usable, and a record that cannot be
//! coerced at all becomes a "[Corrupted]" placeholder instead of failing the
//! whole profile.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use super::ids::RecordId;
use super::money::Money;

/// Category assigned to records whose category is missing
pub const FALLBACK_CATEGORY: &str = "Other";

/// Description given to records that could not be recovered from disk
pub const CORRUPTED_DESCRIPTION: &str = "[Corrupted]";

/// Which list a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    /// Human-readable name ("Expense" / "Income")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => f.pad("EXPENSE"),
            Self::Income => f.pad("INCOME"),
        }
    }
}

/// A single expense or income entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Record {
    pub id: RecordId,
    pub amount: Money,
    pub category: String,
    /// ISO-8601 timestamp, kept as the string it was stored with
    pub date: String,
    pub description: String,
}

impl Record {
    /// Create a new record with a fresh id
    ///
    /// A missing date defaults to the current local time.
    pub fn create(
        amount: Money,
        category: impl Into<String>,
        date: Option<NaiveDateTime>,
        description: Option<String>,
    ) -> Self {
        let date = date.map(format_timestamp).unwrap_or_else(now_timestamp);
        Self {
            id: RecordId::new(),
            amount,
            category: category.into(),
            date,
            description: description.unwrap_or_default(),
        }
    }

    /// Placeholder for a stored record that could not be read
    pub fn corrupted() -> Self {
        Self {
            id: RecordId::new(),
            amount: Money::zero(),
            category: FALLBACK_CATEGORY.to_string(),
            date: now_timestamp(),
            description: CORRUPTED_DESCRIPTION.to_string(),
        }
    }

    /// Whether this record is a recovery placeholder
    pub fn is_corrupted(&self) -> bool {
        self.description == CORRUPTED_DESCRIPTION && self.amount.is_zero()
    }

    /// Rebuild a record from stored JSON, coercing what it can
    pub fn from_value(value: &Value) -> Self {
        match Self::coerce(value) {
            Some(record) => record,
            None => {
                tracing::warn!(record = %value, "unreadable record replaced with placeholder");
                Self::corrupted()
            }
        }
    }

    fn coerce(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let amount = match obj.get("amount") {
            None | Some(Value::Null) => Money::zero(),
            Some(raw) => Money::deserialize(raw).ok()?,
        };

        let id = text_field(obj.get("id"))
            .map(RecordId::from_string)
            .unwrap_or_default();
        let category =
            text_field(obj.get("category")).unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        let date = text_field(obj.get("date")).unwrap_or_else(now_timestamp);
        let description = text_field(obj.get("description")).unwrap_or_default();

        Some(Self {
            id,
            amount,
            category,
            date,
            description,
        })
    }

    /// The stored JSON shape: `{id, amount, category, date, description}`
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "amount": self.amount,
            "category": self.category,
            "date": self.date,
            "description": self.description,
        })
    }

    /// Calendar-day part of the date ("YYYY-MM-DD"), or the whole string if shorter
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    /// Apply a partial update, returning whether anything was provided
    pub fn apply(&mut self, patch: &RecordPatch) -> bool {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(date) = patch.date {
            self.date = format_timestamp(date);
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        !patch.is_empty()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.id,
            self.day(),
            self.category,
            self.amount.format_plain(),
            self.description
        )
    }
}

/// Partial update for a record; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Format a timestamp the way records store it
///
/// Whole seconds are written without a fraction ("2025-01-05T00:00:00"),
/// otherwise microseconds are included.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Current local time in stored form
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

/// Parse a user-supplied date
///
/// Accepts ISO-8601 date-times (with or without offset) and plain
/// `YYYY-MM-DD` dates, which resolve to midnight. Returns `None` for empty or
/// unparseable input.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
