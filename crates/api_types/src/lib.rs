use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for creating an expense.
    ///
    /// Every field is optional on the wire; the server reports missing
    /// required fields as validation errors. `category` defaults to
    /// `"General"` when omitted.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: u64,
        pub description: String,
        pub amount: f64,
        pub category: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }

    /// Confirmation returned after a successful delete.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub message: String,
    }
}

pub mod summary {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        pub total_expenses: usize,
        pub total_amount: f64,
        pub average_amount: f64,
        pub category_breakdown: BTreeMap<String, f64>,
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
