//! Category and date filtering.
//!
//! # Responsibility
//! - Hold transient filter state for list views.
//! - Apply category-equality and exact-date predicates.
//!
//! # Invariants
//! - Filtering preserves input order.
//! - Filter state is never persisted.

use crate::model::expense::{parse_iso_date, Category, Expense};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw widget value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

/// Error for unparseable filter widget values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownCategory(String),
    InvalidDate(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory(value) => write!(f, "unknown category filter `{value}`"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date filter `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for FilterError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses `"All"` or an exact category name.
    pub fn parse(value: &str) -> Option<Self> {
        if value == ALL_CATEGORIES {
            return Some(Self::All);
        }
        Category::parse(value).map(Self::Only)
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }
}

/// Transient list filter: category plus optional exact date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub date: Option<NaiveDate>,
}

impl FilterState {
    pub fn new(category: CategoryFilter, date: Option<NaiveDate>) -> Self {
        Self { category, date }
    }

    /// Builds filter state from raw widget values.
    ///
    /// An empty (or blank) `date` means no date restriction.
    pub fn parse(category: &str, date: &str) -> Result<Self, FilterError> {
        let category = CategoryFilter::parse(category.trim())
            .ok_or_else(|| FilterError::UnknownCategory(category.to_string()))?;
        let date = if date.trim().is_empty() {
            None
        } else {
            Some(parse_iso_date(date).ok_or_else(|| FilterError::InvalidDate(date.to_string()))?)
        };
        Ok(Self { category, date })
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.matches(expense.category)
            && self.date.map_or(true, |date| expense.date == date)
    }

    /// Whether any predicate narrows the list.
    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All || self.date.is_some()
    }

    /// Resets to show everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Returns the records passing `filter`, in input order.
pub fn filter_expenses<'a>(records: &'a [Expense], filter: &FilterState) -> Vec<&'a Expense> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}
