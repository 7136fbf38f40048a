use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{EngineError, ResultEngine};

/// Category assigned to an expense created without one.
pub const DEFAULT_CATEGORY: &str = "General";

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A stored expense record.
///
/// Records are never modified once stored: `id` and `created_at` are assigned
/// by the storage adapter and the remaining fields come from a validated
/// [`ExpenseDraft`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "created_at_from_str")]
    pub created_at: DateTime<Utc>,
}

/// Accepts RFC 3339 timestamps and the offset-less ISO timestamps found in
/// older data files, which are read as UTC.
fn created_at_from_str<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, NAIVE_TIMESTAMP_FORMAT)
        .map(|ts| ts.and_utc())
        .map_err(|_| de::Error::custom(format!("invalid created_at timestamp \"{raw}\"")))
}

/// Raw, unvalidated payload for a new expense.
///
/// Every field is optional so that a missing field surfaces as a
/// [`EngineError::Validation`] instead of a decoding failure.
#[derive(Clone, Debug, Default)]
pub struct ExpenseInput {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// Expense payload that passed validation and only lacks the fields the
/// storage adapter assigns.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseInput {
    /// Checks the payload and turns it into an [`ExpenseDraft`].
    ///
    /// `description`, `amount` and `date` are required, `amount` must be a
    /// positive finite number and `date` a `YYYY-MM-DD` calendar date. A
    /// missing or blank `category` becomes [`DEFAULT_CATEGORY`].
    pub fn validate(self) -> ResultEngine<ExpenseDraft> {
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| EngineError::Validation("description is required".to_string()))?
            .to_string();

        let amount = self
            .amount
            .ok_or_else(|| EngineError::Validation("amount is required".to_string()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let raw_date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| EngineError::Validation("date is required".to_string()))?;
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
            EngineError::Validation(format!("invalid date \"{raw_date}\", expected YYYY-MM-DD"))
        })?;

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        Ok(ExpenseDraft {
            description,
            amount,
            category,
            date,
        })
    }
}

impl ExpenseDraft {
    pub(crate) fn into_expense(self, id: u64, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            created_at,
        }
    }
}

/// Parses a `YYYY-MM-DD` date the same way expense payloads are parsed.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::Validation(format!("invalid date \"{raw}\", expected YYYY-MM-DD"))
    })
}
