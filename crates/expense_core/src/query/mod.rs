//! Read-only views over the expense list.
//!
//! # Responsibility
//! - Aggregate amounts per category for summary and chart display.
//! - Filter the list by category and exact date.
//!
//! # Invariants
//! - Functions here are pure; they never mutate or persist records.

pub mod aggregate;
pub mod filter;
