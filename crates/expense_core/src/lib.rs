//! Core domain logic for the expense tracker.
//! This crate is the single source of truth for expense invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expense::{
    parse_amount, parse_iso_date, round_to_cents, today, Category, Expense, ExpenseDraft,
    ExpenseId, ExpenseValidationError, ValidatedDraft,
};
pub use query::aggregate::{aggregate, format_amount, CategoryShare, CategoryTotal, ExpenseSummary};
pub use query::filter::{filter_expenses, CategoryFilter, FilterError, FilterState, ALL_CATEGORIES};
pub use repo::expense_repo::{
    ExpenseRepository, KvExpenseRepository, RepoError, RepoResult, EXPENSES_STORAGE_KEY,
};
pub use repo::kv_store::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use service::expense_form::{ExpenseForm, FormError, FormField, FormMode, SubmitOutcome};
pub use service::expense_store::{ExpenseStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
