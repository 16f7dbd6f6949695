//! Owner scoping for expense queries

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::Expense;

/// Restricts an operation to the expenses of a single user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerScope {
    owner: Uuid,
}

impl OwnerScope {
    pub fn scoped_to_owner(owner: Uuid) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// Append the owner predicate to a query whose `WHERE` is already open
    pub fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("user_id = ").push_bind(self.owner);
    }

    /// Whether `expense` is visible within this scope
    pub fn permits(&self, expense: &Expense) -> bool {
        expense.owner == self.owner
    }
}
