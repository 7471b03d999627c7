//! Display formatting for terminal output
//!
//! Provides utilities for formatting records, alerts and reports for
//! terminal display.

pub mod record;
pub mod report;

pub use record::{display_date, format_alert, format_record_details, format_record_table};
