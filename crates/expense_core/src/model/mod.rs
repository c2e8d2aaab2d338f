//! Expense domain model.
//!
//! # Responsibility
//! - Define the record, draft and category types used by every layer.
//!
//! # Invariants
//! - Every expense is identified by a stable `ExpenseId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod expense;
