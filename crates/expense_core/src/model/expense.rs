//! Expense domain model.
//!
//! # Responsibility
//! - Define the canonical expense record persisted by the store.
//! - Define the draft shape edited by the form controller.
//! - Own field validation shared by create and update paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another expense.
//! - `title` is non-empty after trimming.
//! - `amount` is finite and strictly positive; drafts commit it in cents.
//! - `date` is a calendar date serialized as `YYYY-MM-DD`.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Stable identifier of one expense record.
///
/// Stored as plain text so ids written by older front-ends (millisecond
/// timestamps) load unchanged next to generated UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generates a fresh collision-improbable id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, rejecting blank values.
    pub fn parse(value: &str) -> Result<Self, ExpenseValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed spending categories.
///
/// Serialized by display name (`"Food"`, `"Transport"`, ...) to match the
/// persisted JSON layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Other,
}

impl Category {
    /// All categories in selection-widget order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Parses an exact category name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for expense fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    /// Record id is blank.
    EmptyId,
    /// Title is empty after trimming.
    EmptyTitle,
    /// Amount input is empty.
    MissingAmount,
    /// Amount input does not parse as a finite number.
    InvalidAmount(String),
    /// Amount is zero or negative.
    NonPositiveAmount(f64),
}

impl ExpenseValidationError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::EmptyTitle => "empty_title",
            Self::MissingAmount => "missing_amount",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::NonPositiveAmount(_) => "non_positive_amount",
        }
    }
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "expense id cannot be empty"),
            Self::EmptyTitle => write!(f, "title is required"),
            Self::MissingAmount => write!(f, "amount is required"),
            Self::InvalidAmount(raw) => write!(f, "amount `{raw}` is not a finite number"),
            Self::NonPositiveAmount(value) => write!(f, "amount must be > 0, got {value}"),
        }
    }
}

impl Error for ExpenseValidationError {}

/// Persisted expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    /// Currency amount with two-decimal semantics.
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl Expense {
    /// Builds a new record with a generated id from a draft.
    pub fn from_draft(draft: &ExpenseDraft) -> Result<Self, ExpenseValidationError> {
        Self::with_id(ExpenseId::generate(), draft)
    }

    /// Builds a record from a draft while keeping a caller-provided id.
    ///
    /// Used by the update path, where identity already exists.
    pub fn with_id(id: ExpenseId, draft: &ExpenseDraft) -> Result<Self, ExpenseValidationError> {
        let fields = draft.validate()?;
        Ok(Self {
            id,
            title: fields.title,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
            notes: fields.notes,
        })
    }

    /// Checks record-level invariants.
    ///
    /// Read paths call this to skip records that were persisted by other
    /// writers in a shape this model does not accept.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        check_amount(self.amount, &self.amount.to_string())?;
        Ok(())
    }
}

/// In-progress form state for one expense.
///
/// `amount` is kept as raw text so partial input survives until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: String,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: Category::default(),
            date: today(),
            notes: String::new(),
        }
    }
}

/// Draft fields after successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: String,
}

impl ExpenseDraft {
    /// Creates a draft with defaults for everything but title and amount.
    pub fn new(title: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Copies an existing record into editable form.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: expense.category,
            date: expense.date,
            notes: expense.notes.clone(),
        }
    }

    /// Validates required fields and parses the amount.
    ///
    /// # Errors
    /// - `EmptyTitle` when title is blank.
    /// - `MissingAmount`, `InvalidAmount` or `NonPositiveAmount` for amount.
    pub fn validate(&self) -> Result<ValidatedDraft, ExpenseValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        let amount = parse_amount(&self.amount)?;

        Ok(ValidatedDraft {
            title: title.to_string(),
            amount,
            category: self.category,
            date: self.date,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Parses raw amount input into a positive finite number of cents.
///
/// Extra fractional digits are rounded to cents before the sign check, so
/// `"0.001"` is rejected as non-positive.
pub fn parse_amount(raw: &str) -> Result<f64, ExpenseValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExpenseValidationError::MissingAmount);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ExpenseValidationError::InvalidAmount(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ExpenseValidationError::InvalidAmount(trimmed.to_string()));
    }
    let value = round_to_cents(value);
    check_amount(value, trimmed)?;
    Ok(value)
}

fn check_amount(value: f64, raw: &str) -> Result<(), ExpenseValidationError> {
    if !value.is_finite() {
        return Err(ExpenseValidationError::InvalidAmount(raw.to_string()));
    }
    if value <= 0.0 {
        return Err(ExpenseValidationError::NonPositiveAmount(value));
    }
    Ok(())
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Unpadded forms such as `2024-1-2` are rejected so that exact date
/// comparisons stay meaningful.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Rounds a currency value to two decimals.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current local calendar date, the default for new drafts.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
