//! The expense tracker
//!
//! [`ExpenseTracker`] owns one user's profile in memory and writes the whole
//! profile back to the shared store after every mutation. Budget checks read
//! straight from the in-memory lists.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budgets, Money, Record, RecordKind, RecordPatch, UserProfile};
use crate::storage::ProfileStore;

use super::budget::{BudgetAlert, BudgetEvaluator, BudgetStatusReport};

/// Result of adding an expense
#[derive(Debug, Clone)]
pub struct ExpenseAdded {
    pub expense: Record,
    /// Set when the expense pushed its category past its limit
    pub alert: Option<BudgetAlert>,
}

/// Search filters for expense and income lookups
///
/// Only `term` and `category` narrow results. The date and amount bounds are
/// accepted for interface compatibility but are not applied.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive substring of the description
    pub term: Option<String>,
    /// Case-insensitive exact category (expenses only)
    pub category: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
}

impl SearchQuery {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    fn matches_term(&self, record: &Record) -> bool {
        match self.term.as_deref().filter(|t| !t.is_empty()) {
            Some(term) => record
                .description
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }

    fn matches_category(&self, record: &Record) -> bool {
        match self.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => record.category.to_lowercase() == category.to_lowercase(),
            None => true,
        }
    }
}

/// Budget vs. spending snapshot
///
/// `total` covers every expense on record, whatever its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub budget: Money,
    pub total: Money,
    pub over_budget: Money,
    pub year: i32,
    pub month: u32,
}

impl MonthlySummary {
    /// Month label such as "March 2025"
    pub fn period_label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = format!("Monthly Summary ({})\n", self.period_label());
        output.push_str(&"-".repeat(35));
        output.push('\n');
        output.push_str(&format!(
            "Budget:         {}\n",
            self.budget.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total spent:    {}\n",
            self.total.format_with_symbol(symbol)
        ));
        if self.over_budget.is_positive() {
            output.push_str(&format!(
                "Over budget by: {}\n",
                self.over_budget.format_with_symbol(symbol)
            ));
        }
        output
    }
}

/// One user's records, categories and budgets
pub struct ExpenseTracker {
    profile: UserProfile,
    store: ProfileStore,
    audit: Option<AuditLogger>,
}

impl ExpenseTracker {
    /// Load `user_name`'s profile, or start a fresh one
    ///
    /// Nothing is written until the first mutation.
    pub fn open(user_name: &str, store: ProfileStore) -> TrackerResult<Self> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(TrackerError::Validation("User name cannot be empty".into()));
        }

        let profile = match store.load(user_name)? {
            Some(profile) => profile,
            None => {
                tracing::debug!(user = user_name, "no stored profile, starting fresh");
                UserProfile::new(user_name)
            }
        };

        Ok(Self {
            profile,
            store,
            audit: None,
        })
    }

    /// Record every change in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn user_name(&self) -> &str {
        &self.profile.user_name
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn budgets(&self) -> &Budgets {
        &self.profile.budgets
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Write the full profile to the shared store
    pub fn save(&self) -> TrackerResult<()> {
        self.store.save(&self.profile)
    }

    fn audit(&self, entry: impl FnOnce(&str) -> AuditEntry) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry(self.user_name())),
            None => Ok(()),
        }
    }

    // === Records ===

    /// Add an expense and check its category budget
    pub fn add_expense(
        &mut self,
        amount: Money,
        category: impl Into<String>,
        date: Option<NaiveDateTime>,
        description: Option<String>,
    ) -> TrackerResult<ExpenseAdded> {
        let expense = self.add_record(
            RecordKind::Expense,
            amount,
            category.into(),
            date,
            description,
        )?;

        let alert = self.evaluator().check_category(&expense.category);
        if let Some(alert) = &alert {
            tracing::info!(
                user = %self.profile.user_name,
                category = %alert.category,
                limit = %alert.limit,
                spent = %alert.spent,
                "category budget exceeded"
            );
        }

        Ok(ExpenseAdded { expense, alert })
    }

    pub fn add_income(
        &mut self,
        amount: Money,
        category: impl Into<String>,
        date: Option<NaiveDateTime>,
        description: Option<String>,
    ) -> TrackerResult<Record> {
        self.add_record(RecordKind::Income, amount, category.into(), date, description)
    }

    fn add_record(
        &mut self,
        kind: RecordKind,
        amount: Money,
        category: String,
        date: Option<NaiveDateTime>,
        description: Option<String>,
    ) -> TrackerResult<Record> {
        ensure_positive(amount)?;

        let record = Record::create(amount, category, date, description);
        self.profile.records_mut(kind).push(record.clone());
        self.save()?;

        self.audit(|user| {
            AuditEntry::create(
                user,
                EntityType::record(kind),
                record.id.as_str(),
                Some(record.category.clone()),
                &record,
            )
        })?;

        Ok(record)
    }

    /// Apply a partial update to an expense; `false` if the id is unknown
    pub fn edit_expense(&mut self, id: &str, patch: &RecordPatch) -> TrackerResult<bool> {
        self.edit_record(RecordKind::Expense, id, patch)
    }

    /// Apply a partial update to an income record; `false` if the id is unknown
    pub fn edit_income(&mut self, id: &str, patch: &RecordPatch) -> TrackerResult<bool> {
        self.edit_record(RecordKind::Income, id, patch)
    }

    fn edit_record(
        &mut self,
        kind: RecordKind,
        id: &str,
        patch: &RecordPatch,
    ) -> TrackerResult<bool> {
        if let Some(amount) = patch.amount {
            ensure_positive(amount)?;
        }

        let Some(record) = self
            .profile
            .records_mut(kind)
            .iter_mut()
            .find(|r| r.id == *id)
        else {
            return Ok(false);
        };

        let before = record.clone();
        record.apply(patch);
        let after = record.clone();

        self.save()?;

        self.audit(|user| {
            AuditEntry::update(
                user,
                EntityType::record(kind),
                id,
                Some(after.category.clone()),
                &before,
                &after,
                describe_changes(&before, &after),
            )
        })?;

        Ok(true)
    }

    /// Remove an expense; `false` (and no write) if the id is unknown
    pub fn delete_expense(&mut self, id: &str) -> TrackerResult<bool> {
        self.delete_record(RecordKind::Expense, id)
    }

    /// Remove an income record; `false` (and no write) if the id is unknown
    pub fn delete_income(&mut self, id: &str) -> TrackerResult<bool> {
        self.delete_record(RecordKind::Income, id)
    }

    fn delete_record(&mut self, kind: RecordKind, id: &str) -> TrackerResult<bool> {
        let records = self.profile.records_mut(kind);
        let Some(index) = records.iter().position(|r| r.id == *id) else {
            return Ok(false);
        };

        let removed = records.remove(index);
        self.save()?;

        self.audit(|user| {
            AuditEntry::delete(
                user,
                EntityType::record(kind),
                id,
                Some(removed.category.clone()),
                &removed,
            )
        })?;

        Ok(true)
    }

    pub fn find_expense(&self, id: &str) -> Option<&Record> {
        self.profile.expenses.iter().find(|r| r.id == *id)
    }

    pub fn find_income(&self, id: &str) -> Option<&Record> {
        self.profile.income.iter().find(|r| r.id == *id)
    }

    pub fn list_expenses(&self) -> &[Record] {
        &self.profile.expenses
    }

    pub fn list_income(&self) -> &[Record] {
        &self.profile.income
    }

    /// Expenses matching the query's description term and category
    pub fn search(&self, query: &SearchQuery) -> Vec<&Record> {
        self.profile
            .expenses
            .iter()
            .filter(|r| query.matches_term(r) && query.matches_category(r))
            .collect()
    }

    /// Income matching the query's description term; other filters are ignored
    pub fn search_income(&self, query: &SearchQuery) -> Vec<&Record> {
        self.profile
            .income
            .iter()
            .filter(|r| query.matches_term(r))
            .collect()
    }

    // === Budgets ===

    pub fn evaluator(&self) -> BudgetEvaluator<'_> {
        BudgetEvaluator::new(&self.profile.expenses, &self.profile.budgets)
    }

    pub fn budget_status(&self) -> BudgetStatusReport {
        self.evaluator().status_report()
    }

    /// All-time spending compared with the monthly limit
    pub fn monthly_summary(&self) -> MonthlySummary {
        let budget = self.profile.budgets.monthly;
        let total = self.evaluator().total_spent();
        let over_budget = if budget.is_positive() && total > budget {
            total - budget
        } else {
            Money::zero()
        };
        let today = Local::now().date_naive();

        MonthlySummary {
            budget,
            total,
            over_budget,
            year: today.year(),
            month: today.month(),
        }
    }

    /// Replace the monthly limit; zero removes it
    pub fn set_monthly_budget(&mut self, amount: Money) -> TrackerResult<()> {
        ensure_not_negative(amount)?;

        let before = self.profile.budgets.monthly;
        self.profile.budgets.monthly = amount;
        self.save()?;

        self.audit(|user| {
            AuditEntry::update(
                user,
                EntityType::Budget,
                "monthly",
                None,
                &before,
                &amount,
                Some(format!("monthly: {} -> {}", before.format_plain(), amount.format_plain())),
            )
        })
    }

    /// Set the limit for one category; zero removes it
    pub fn set_category_budget(&mut self, category: &str, amount: Money) -> TrackerResult<()> {
        ensure_not_negative(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(TrackerError::Validation("Category name cannot be empty".into()));
        }

        let before = self
            .profile
            .budgets
            .categories
            .insert(category.to_string(), amount)
            .unwrap_or_default();
        self.save()?;

        self.audit(|user| {
            AuditEntry::update(
                user,
                EntityType::Budget,
                category,
                Some(category.to_string()),
                &before,
                &amount,
                Some(format!(
                    "{}: {} -> {}",
                    category,
                    before.format_plain(),
                    amount.format_plain()
                )),
            )
        })
    }

    // === Categories ===

    pub fn categories(&self) -> &[String] {
        &self.profile.categories
    }

    pub fn income_categories(&self) -> &[String] {
        &self.profile.income_categories
    }

    /// Append a category unless one with the same name (ignoring case) exists
    pub fn add_category(&mut self, kind: RecordKind, name: &str) -> TrackerResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation("Category name cannot be empty".into()));
        }

        let list = self.profile.category_list_mut(kind);
        let wanted = name.to_lowercase();
        if list.iter().any(|c| c.to_lowercase() == wanted) {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        list.push(name.to_string());
        self.save()?;

        self.audit(|user| {
            AuditEntry::create(
                user,
                EntityType::category(kind),
                name,
                Some(name.to_string()),
                &name,
            )
        })
    }

    /// Remove the category matching `name` (ignoring case); `false` if none does
    ///
    /// Records keep their category label and budget limits are left alone.
    pub fn remove_category(&mut self, kind: RecordKind, name: &str) -> TrackerResult<bool> {
        let wanted = name.trim().to_lowercase();
        let list = self.profile.category_list_mut(kind);
        let Some(index) = list.iter().position(|c| c.to_lowercase() == wanted) else {
            return Ok(false);
        };

        let removed = list.remove(index);
        self.save()?;

        self.audit(|user| {
            AuditEntry::delete(
                user,
                EntityType::category(kind),
                removed.as_str(),
                Some(removed.clone()),
                &removed,
            )
        })?;

        Ok(true)
    }
}

fn ensure_positive(amount: Money) -> TrackerResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(TrackerError::Validation(
            "Amount must be greater than zero".into(),
        ))
    }
}

fn ensure_not_negative(amount: Money) -> TrackerResult<()> {
    if amount.is_negative() {
        Err(TrackerError::Validation("Budget limit cannot be negative".into()))
    } else {
        Ok(())
    }
}

fn describe_changes(before: &Record, after: &Record) -> Option<String> {
    let mut changes = Vec::new();
    if before.amount != after.amount {
        changes.push(format!(
            "amount: {} -> {}",
            before.amount.format_plain(),
            after.amount.format_plain()
        ));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: {:?} -> {:?}",
            before.description, after.description
        ));
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}
