//! Input validation for expense payloads

use chrono::{DateTime, Utc};

use crate::{
    dates,
    models::{
        CreateExpenseRequest, DEFAULT_CATEGORY, ExpenseChanges, ExpenseDraft, ExpenseFilter,
        ExpenseQuery, UpdateExpenseRequest,
    },
};

/// Message returned when a new expense lacks its required fields
pub const MISSING_REQUIRED_FIELDS: &str = "Title and amount are required";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate a create request and apply defaults
///
/// `now` becomes the expense date when the client does not supply one.
pub fn validate_new_expense(
    request: CreateExpenseRequest,
    now: DateTime<Utc>,
) -> Result<ExpenseDraft, String> {
    let (Some(title), Some(amount)) = (non_blank(request.title), request.amount) else {
        return Err(MISSING_REQUIRED_FIELDS.to_string());
    };

    if !amount.is_finite() {
        return Err("Amount must be a finite number".to_string());
    }

    Ok(ExpenseDraft {
        title,
        amount,
        category: non_blank(request.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        date: request.date.unwrap_or(now),
    })
}

/// Validate an update request
///
/// Absent or null fields are left untouched. A field that is present must
/// still satisfy the same rules as on creation.
pub fn validate_changes(request: UpdateExpenseRequest) -> Result<ExpenseChanges, String> {
    if matches!(&request.title, Some(title) if title.trim().is_empty()) {
        return Err("Title must not be empty".to_string());
    }

    if matches!(&request.category, Some(category) if category.trim().is_empty()) {
        return Err("Category must not be empty".to_string());
    }

    if matches!(request.amount, Some(amount) if !amount.is_finite()) {
        return Err("Amount must be a finite number".to_string());
    }

    Ok(ExpenseChanges {
        title: request.title,
        amount: request.amount,
        category: request.category,
        date: request.date,
    })
}

/// Validate listing query parameters
///
/// Empty parameters (`?category=`) count as absent.
pub fn validate_filter(query: ExpenseQuery) -> Result<ExpenseFilter, String> {
    let from = match non_blank(query.start_date) {
        Some(raw) => {
            Some(dates::parse_timestamp(&raw).ok_or_else(|| format!("Invalid startDate `{raw}`"))?)
        }
        None => None,
    };

    let until = match non_blank(query.end_date) {
        Some(raw) => {
            Some(dates::parse_range_end(&raw).ok_or_else(|| format!("Invalid endDate `{raw}`"))?)
        }
        None => None,
    };

    Ok(ExpenseFilter {
        category: non_blank(query.category),
        from,
        until,
    })
}
