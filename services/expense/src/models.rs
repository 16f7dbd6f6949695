//! Expense service models

pub mod expense;
pub mod user;

pub use expense::{
    CreateExpenseRequest, DEFAULT_CATEGORY, Expense, ExpenseChanges, ExpenseDraft, ExpenseFilter,
    ExpenseQuery, UpdateExpenseRequest,
};
pub use user::User;
