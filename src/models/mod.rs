//! Core data models for the expense tracker
//!
//! Records (expenses and income), money amounts, and the per-user profile
//! that groups them together with categories and budget limits.

pub mod ids;
pub mod money;
pub mod profile;
pub mod record;

pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use profile::{Budgets, UserProfile, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
pub use record::{parse_date, Record, RecordKind, RecordPatch};
