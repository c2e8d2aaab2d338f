//! Core use-case services.
//!
//! # Responsibility
//! - Own the expense list and its persistence lifecycle.
//! - Drive create/edit flows from draft to committed record.
//!
//! # Invariants
//! - Services reach storage only through `ExpenseRepository`.

pub mod expense_form;
pub mod expense_store;
