//! Audit logging for the expense tracker
//!
//! Records every create, update and delete of records, categories and budget
//! limits with before/after values in an append-only JSONL log.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let id = expense.id.as_str();
//! let entry = AuditEntry::create("alice", EntityType::Expense, id, None, &expense);
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
