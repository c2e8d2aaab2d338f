//! Expense list persistence adapter.
//!
//! # Responsibility
//! - Load and save the full expense list as one JSON document.
//! - Keep the storage key and encoding inside the persistence boundary.
//!
//! # Invariants
//! - The stored value is a JSON array of `Expense` objects.
//! - Absent or malformed stored values load as an empty list.
//! - Array elements that fail to decode or validate are skipped one by one.

use crate::model::expense::Expense;
use crate::repo::kv_store::{KeyValueStore, KvError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the expense list is stored.
pub const EXPENSES_STORAGE_KEY: &str = "expenseItems";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for expense list writes.
#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode expenses: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Persistence interface injected into the expense store.
pub trait ExpenseRepository {
    /// Loads the stored list; never fails, degrading to empty.
    fn load(&self) -> Vec<Expense>;
    /// Replaces the stored list with `expenses`.
    fn save(&self, expenses: &[Expense]) -> RepoResult<()>;
}

/// JSON-over-key-value expense repository.
pub struct KvExpenseRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvExpenseRepository<S> {
    /// Uses the default `expenseItems` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, EXPENSES_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ExpenseRepository for KvExpenseRepository<S> {
    fn load(&self) -> Vec<Expense> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=expenses_load module=repo status=empty key={}",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=expenses_load module=repo status=error key={} error_code=kv_read_failed error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=expenses_load module=repo status=error key={} error_code=malformed_payload error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let total = items.len();
        let expenses = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| decode_record(index, item))
            .collect::<Vec<_>>();

        info!(
            "event=expenses_load module=repo status=ok key={} count={} skipped={}",
            self.key,
            expenses.len(),
            total - expenses.len()
        );
        expenses
    }

    fn save(&self, expenses: &[Expense]) -> RepoResult<()> {
        let payload = serde_json::to_string(expenses).map_err(RepoError::Encode)?;
        self.store.set(&self.key, &payload)?;
        debug!(
            "event=expenses_save module=repo status=ok key={} count={} bytes={}",
            self.key,
            expenses.len(),
            payload.len()
        );
        Ok(())
    }
}

/// Decodes one stored array element, `None` when it must be skipped.
fn decode_record(index: usize, item: serde_json::Value) -> Option<Expense> {
    let expense = match serde_json::from_value::<Expense>(item) {
        Ok(expense) => expense,
        Err(err) => {
            warn!(
                "event=expenses_load module=repo status=skipped index={index} error_code=undecodable_record error={err}"
            );
            return None;
        }
    };
    if let Err(err) = expense.validate() {
        warn!(
            "event=expenses_load module=repo status=skipped index={index} id={} error_code={}",
            expense.id,
            err.code()
        );
        return None;
    }
    Some(expense)
}
