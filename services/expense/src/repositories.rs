//! Repositories for database operations
//!
//! Handlers talk to storage through the [`ExpenseRepository`] and
//! [`UserRepository`] traits. Every expense operation takes an
//! [`OwnerScope`], so no query can be issued without an owner filter.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{Expense, ExpenseChanges, ExpenseDraft, ExpenseFilter, User};

pub mod expense;
#[cfg(test)]
pub mod memory;
pub mod scope;
pub mod user;

pub use expense::PgExpenseRepository;
pub use scope::OwnerScope;
pub use user::PgUserRepository;

/// Storage for expense records
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Persist a new expense owned by the scope's user
    async fn create(&self, scope: OwnerScope, draft: &ExpenseDraft) -> DatabaseResult<Expense>;

    /// List the scope's expenses matching `filter`, newest `date` first
    async fn list(&self, scope: OwnerScope, filter: &ExpenseFilter)
    -> DatabaseResult<Vec<Expense>>;

    /// Apply `changes` to the expense `id` if the scope owns it
    async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        changes: &ExpenseChanges,
    ) -> DatabaseResult<Option<Expense>>;

    /// Remove the expense `id` if the scope owns it; `false` when nothing matched
    async fn delete(&self, scope: OwnerScope, id: Uuid) -> DatabaseResult<bool>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> DatabaseResult<bool>;
}

/// Read access to the users owned by the auth service
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Database migrations applied");
    Ok(())
}
