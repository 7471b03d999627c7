//! Reports module for the expense tracker
//!
//! Provides the global balance, category breakdowns, a merged timeline and
//! date-prefix filtering.

pub mod balance;
pub mod category;
pub mod period;
pub mod timeline;

pub use balance::BalanceReport;
pub use category::{CategoryTotal, CategoryTotalsReport, ExpensesByCategoryReport};
pub use period::PeriodReport;
pub use timeline::{TimelineEntry, TimelineReport};
