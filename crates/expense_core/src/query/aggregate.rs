//! Per-category aggregation.
//!
//! # Responsibility
//! - Sum amounts per category and overall.
//! - Derive percentage shares for chart rendering.
//!
//! # Invariants
//! - Each category value is rounded to cents independently.
//! - `total_expenses` stays unrounded; round only for display.
//! - Category order is first-seen order over the input.

use crate::model::expense::{round_to_cents, Category, Expense};

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: Category,
    /// Sum of amounts, rounded to two decimals.
    pub value: f64,
}

impl CategoryTotal {
    /// Share of `total` in percent, `0.0` when `total` is not positive.
    pub fn share_percent(&self, total: f64) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        self.value / total * 100.0
    }
}

/// One pie-chart slice.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: Category,
    pub value: f64,
    pub percent: f64,
}

/// Derived totals for a list of expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseSummary {
    pub total_expenses: f64,
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    /// Total rounded to cents for display.
    pub fn display_total(&self) -> f64 {
        round_to_cents(self.total_expenses)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    pub fn category(&self, name: Category) -> Option<&CategoryTotal> {
        self.by_category.iter().find(|entry| entry.name == name)
    }

    /// Chart slices with percentage of the overall total.
    pub fn shares(&self) -> Vec<CategoryShare> {
        self.by_category
            .iter()
            .map(|entry| CategoryShare {
                name: entry.name,
                value: entry.value,
                percent: entry.share_percent(self.total_expenses),
            })
            .collect()
    }
}

/// Aggregates `records` into a total and per-category sums.
pub fn aggregate(records: &[Expense]) -> ExpenseSummary {
    let mut sums: Vec<(Category, f64)> = Vec::new();
    let mut total = 0.0;

    for record in records {
        total += record.amount;
        match sums.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, sum)) => *sum += record.amount,
            None => sums.push((record.category, record.amount)),
        }
    }

    ExpenseSummary {
        total_expenses: total,
        by_category: sums
            .into_iter()
            .map(|(name, sum)| CategoryTotal {
                name,
                value: round_to_cents(sum),
            })
            .collect(),
    }
}

/// Formats a currency value as `$` with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("${value:.2}")
}
