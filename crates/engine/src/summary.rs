//! Summary statistics over the expense collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Expense;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_expenses: usize,
    pub total_amount: f64,
    /// Mean amount rounded to cents, `0` for an empty collection.
    pub average_amount: f64,
    pub category_breakdown: BTreeMap<String, f64>,
}

impl Summary {
    /// Computes count, total, average and per-category totals in one pass.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut summary = expenses.iter().fold(Summary::default(), |mut acc, e| {
            acc.total_expenses += 1;
            acc.total_amount += e.amount;
            *acc.category_breakdown.entry(e.category.clone()).or_insert(0.0) += e.amount;
            acc
        });

        if summary.total_expenses > 0 {
            summary.average_amount =
                round_cents(summary.total_amount / summary.total_expenses as f64);
        }
        summary
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
