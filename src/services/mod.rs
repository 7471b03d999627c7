//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, budget checks, and audit logging.

pub mod budget;
pub mod tracker;

pub use budget::{
    BudgetAlert, BudgetEvaluator, BudgetStatus, BudgetStatusReport, CategoryBudgetLine,
    MonthlyStanding,
};
pub use tracker::{ExpenseAdded, ExpenseTracker, MonthlySummary, SearchQuery};
