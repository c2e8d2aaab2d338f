//! Expense store use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory expense list.
//! - Persist the full list after every mutation.
//! - Keep the category summary in sync with the list.
//!
//! # Invariants
//! - The list is sorted descending by date after load and every mutation.
//! - Sorting is stable; a newly added record leads its date group.
//! - Persistence happens after the in-memory mutation it reflects.
//! - Unknown ids make `update`/`delete` a no-op with nothing persisted.

use crate::model::expense::{Expense, ExpenseDraft, ExpenseId, ExpenseValidationError};
use crate::query::aggregate::{aggregate, ExpenseSummary};
use crate::query::filter::{filter_expenses, FilterState};
use crate::repo::expense_repo::{ExpenseRepository, RepoError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for rejected drafts and failed writes.
#[derive(Debug)]
pub enum StoreError {
    /// Draft failed validation; the list is unchanged.
    Validation(ExpenseValidationError),
    /// Persisting failed; the in-memory mutation is kept.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ExpenseValidationError> for StoreError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordered expense list bound to an injected repository.
pub struct ExpenseStore<R: ExpenseRepository> {
    repo: R,
    expenses: Vec<Expense>,
    summary: ExpenseSummary,
}

impl<R: ExpenseRepository> ExpenseStore<R> {
    /// Loads the persisted list once and derives the summary.
    pub fn open(repo: R) -> Self {
        let mut expenses = repo.load();
        sort_by_date_desc(&mut expenses);
        let summary = aggregate(&expenses);
        info!(
            "event=store_open module=store status=ok count={}",
            expenses.len()
        );
        Self {
            repo,
            expenses,
            summary,
        }
    }

    /// Records in display order (newest date first).
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    /// Summary derived from the current list.
    pub fn summary(&self) -> &ExpenseSummary {
        &self.summary
    }

    /// Records passing `filter`, in display order.
    pub fn filtered(&self, filter: &FilterState) -> Vec<&Expense> {
        filter_expenses(&self.expenses, filter)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a record from `draft` with a fresh id.
    ///
    /// # Errors
    /// - `Validation` when the draft is rejected; nothing changes.
    /// - `Repo` when the write fails; the record stays in memory.
    pub fn add(&mut self, draft: &ExpenseDraft) -> StoreResult<ExpenseId> {
        let expense = Expense::from_draft(draft).inspect_err(|err| log_rejected("add", err))?;
        let id = expense.id.clone();
        self.expenses.insert(0, expense);
        self.commit("expense_add", &id)?;
        Ok(id)
    }

    /// Replaces the fields of record `id` with `draft`, keeping the id.
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub fn update(&mut self, id: &ExpenseId, draft: &ExpenseDraft) -> StoreResult<bool> {
        let updated =
            Expense::with_id(id.clone(), draft).inspect_err(|err| log_rejected("update", err))?;
        let Some(slot) = self.expenses.iter_mut().find(|expense| &expense.id == id) else {
            debug!("event=expense_update module=store status=not_found id={id}");
            return Ok(false);
        };
        *slot = updated;
        self.commit("expense_update", id)?;
        Ok(true)
    }

    /// Removes record `id`.
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub fn delete(&mut self, id: &ExpenseId) -> StoreResult<bool> {
        let Some(position) = self.expenses.iter().position(|expense| &expense.id == id) else {
            debug!("event=expense_delete module=store status=not_found id={id}");
            return Ok(false);
        };
        self.expenses.remove(position);
        self.commit("expense_delete", id)?;
        Ok(true)
    }

    fn commit(&mut self, event: &'static str, id: &ExpenseId) -> StoreResult<()> {
        sort_by_date_desc(&mut self.expenses);
        self.summary = aggregate(&self.expenses);

        if let Err(err) = self.repo.save(&self.expenses) {
            error!(
                "event={event} module=store status=error id={id} error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }

        info!(
            "event={event} module=store status=ok id={id} count={}",
            self.expenses.len()
        );
        Ok(())
    }
}

fn sort_by_date_desc(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

fn log_rejected(operation: &str, err: &ExpenseValidationError) {
    debug!(
        "event=expense_{operation} module=store status=rejected error_code={}",
        err.code()
    );
}
