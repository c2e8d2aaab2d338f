//! Persistence abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value contract the expense list is stored through.
//! - Isolate JSON encoding and SQLite details from the store.
//!
//! # Invariants
//! - Loads never fail; unreadable state degrades to an empty list.
//! - Writes replace the whole stored list.

pub mod expense_repo;
pub mod kv_store;
