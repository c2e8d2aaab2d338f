//! Expense form controller.
//!
//! # Responsibility
//! - Track one draft in create or edit mode.
//! - Commit validated drafts to the expense store.
//!
//! # Invariants
//! - A rejected submit changes neither the draft nor the mode.
//! - A submit that reached the store resets the draft and closes the form.
//! - Edit mode always targets the id the draft was copied from.

use crate::model::expense::{
    parse_iso_date, Category, Expense, ExpenseDraft, ExpenseId, ExpenseValidationError,
};
use crate::repo::expense_repo::ExpenseRepository;
use crate::service::expense_store::{ExpenseStore, StoreError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What a submit will do with the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ExpenseId),
}

/// Editable draft field, named like the form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Amount,
    Category,
    Date,
    Notes,
}

impl FormField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "amount" => Some(Self::Amount),
            "category" => Some(Self::Category),
            "date" => Some(Self::Date),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
            Self::Notes => "notes",
        }
    }
}

/// Result of a submit that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ExpenseId),
    Updated(ExpenseId),
    /// The edit target was deleted meanwhile; nothing changed.
    TargetMissing(ExpenseId),
}

#[derive(Debug)]
pub enum FormError {
    /// Submit called while the form is closed.
    Closed,
    /// Draft rejected; form state unchanged.
    Validation(ExpenseValidationError),
    /// Raw input for a typed field did not parse.
    InvalidField { field: FormField, value: String },
    /// Store accepted the change but could not persist it.
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "form is not open"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidField { field, value } => {
                write!(f, "invalid value `{value}` for field `{}`", field.as_str())
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Closed | Self::InvalidField { .. } => None,
        }
    }
}

impl From<ExpenseValidationError> for FormError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Create/edit form over one draft.
#[derive(Debug, Default)]
pub struct ExpenseForm {
    mode: Option<FormMode>,
    draft: ExpenseDraft,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    /// Current mode, `None` while closed.
    pub fn mode(&self) -> Option<&FormMode> {
        self.mode.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Some(FormMode::Edit(_)))
    }

    /// Opens in create mode; an already open form keeps its state.
    pub fn open_create(&mut self) {
        if self.mode.is_none() {
            self.draft = ExpenseDraft::default();
            self.mode = Some(FormMode::Create);
        }
    }

    /// Switches to edit mode with `expense` copied into the draft.
    pub fn begin_edit(&mut self, expense: &Expense) {
        self.draft = ExpenseDraft::from_expense(expense);
        self.mode = Some(FormMode::Edit(expense.id.clone()));
        debug!("event=form_edit module=form status=ok id={}", expense.id);
    }

    /// Updates one draft field from raw input text.
    ///
    /// Title, amount and notes take text as-is; amount is only checked on
    /// submit. Category and date must parse or the draft is left untouched.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        let invalid = || FormError::InvalidField {
            field,
            value: value.to_string(),
        };
        match field {
            FormField::Title => self.draft.title = value.to_string(),
            FormField::Amount => self.draft.amount = value.to_string(),
            FormField::Notes => self.draft.notes = value.to_string(),
            FormField::Category => {
                self.draft.category = Category::parse(value).ok_or_else(invalid)?;
            }
            FormField::Date => {
                self.draft.date = parse_iso_date(value).ok_or_else(invalid)?;
            }
        }
        Ok(())
    }

    /// Closes the form and discards the draft.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validates the draft and commits it to `store`.
    ///
    /// # Errors
    /// - `Closed` when no mode is active.
    /// - `Validation` when the draft is rejected; nothing changes.
    /// - `Store` when persisting failed after the store applied the change;
    ///   the form is reset since the change is already in memory.
    pub fn submit<R: ExpenseRepository>(
        &mut self,
        store: &mut ExpenseStore<R>,
    ) -> Result<SubmitOutcome, FormError> {
        let Some(mode) = self.mode.clone() else {
            return Err(FormError::Closed);
        };
        if let Err(err) = self.draft.validate() {
            debug!(
                "event=form_submit module=form status=rejected error_code={}",
                err.code()
            );
            return Err(err.into());
        }

        let result = match mode {
            FormMode::Create => store.add(&self.draft).map(SubmitOutcome::Created),
            FormMode::Edit(id) => store.update(&id, &self.draft).map(|found| {
                if found {
                    SubmitOutcome::Updated(id)
                } else {
                    SubmitOutcome::TargetMissing(id)
                }
            }),
        };

        match result {
            Err(StoreError::Validation(err)) => Err(err.into()),
            Err(err) => {
                self.reset();
                Err(FormError::Store(err))
            }
            Ok(outcome) => {
                self.reset();
                Ok(outcome)
            }
        }
    }

    fn reset(&mut self) {
        self.mode = None;
        self.draft = ExpenseDraft::default();
    }
}
