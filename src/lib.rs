//! Expense Tracker - Terminal-based personal expense and income tracking
//!
//! This library provides the core functionality for the `tracker` binary.
//! Several users share one JSON profiles file; each user's expenses, income,
//! categories and budget limits live in their own profile entry.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, records, profiles)
//! - `storage`: Shared JSON profile store
//! - `services`: The tracker and the budget evaluator
//! - `reports`: Balance, category, timeline and period reports
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::models::Money;
//! use expense_tracker::services::ExpenseTracker;
//! use expense_tracker::storage::ProfileStore;
//!
//! let store = ProfileStore::new("profiles.json".into());
//! let mut tracker = ExpenseTracker::open("alice", store)?;
//! let added = tracker.add_expense(Money::from_cents(1250), "Food", None, None)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TrackerError;
