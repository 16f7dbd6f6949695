//! Expense model and request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::dates;

/// Category applied when a new expense does not name one
pub const DEFAULT_CATEGORY: &str = "Other";

/// Expense entity
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    #[sqlx(rename = "user_id")]
    pub owner: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new expense, defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
}

/// Validated partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Validated listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower bound on `date`
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date`
    pub until: Option<DateTime<Utc>>,
}

/// Request body for `POST /expence`
///
/// Unknown keys such as `owner` or `user` are ignored; the owner always
/// comes from the authenticated caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    pub date: Option<DateTime<Utc>>,
}

/// Request body for `PUT /expence/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    pub date: Option<DateTime<Utc>>,
}

/// Query parameters for `GET /expence`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
