//! PostgreSQL expense repository

use async_trait::async_trait;
use common::{
    database,
    error::{DatabaseError, DatabaseResult},
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use super::{ExpenseRepository, OwnerScope};
use crate::models::{Expense, ExpenseChanges, ExpenseDraft, ExpenseFilter};

const EXPENSE_COLUMNS: &str =
    "id, user_id, title, amount, category, date, created_at, updated_at";

/// Expense repository backed by the `expenses` table
#[derive(Clone)]
pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    /// Create a new expense repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the optional listing predicates after the owner predicate
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ExpenseFilter) {
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(from) = filter.from {
        builder.push(" AND date >= ").push_bind(from);
    }
    if let Some(until) = filter.until {
        builder.push(" AND date <= ").push_bind(until);
    }
}

fn list_query(scope: OwnerScope, filter: &ExpenseFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE "));
    scope.push_predicate(&mut builder);
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY date DESC, created_at DESC");
    builder
}

fn update_query(
    scope: OwnerScope,
    id: Uuid,
    changes: &ExpenseChanges,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE expenses SET title = COALESCE(");
    builder
        .push_bind(changes.title.clone())
        .push(", title), amount = COALESCE(")
        .push_bind(changes.amount)
        .push(", amount), category = COALESCE(")
        .push_bind(changes.category.clone())
        .push(", category), date = COALESCE(")
        .push_bind(changes.date)
        .push(", date), updated_at = NOW() WHERE ");
    scope.push_predicate(&mut builder);
    builder
        .push(" AND id = ")
        .push_bind(id)
        .push(format!(" RETURNING {EXPENSE_COLUMNS}"));
    builder
}

fn delete_query(scope: OwnerScope, id: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("DELETE FROM expenses WHERE ");
    scope.push_predicate(&mut builder);
    builder.push(" AND id = ").push_bind(id).push(" RETURNING id");
    builder
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn create(&self, scope: OwnerScope, draft: &ExpenseDraft) -> DatabaseResult<Expense> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses (id, user_id, title, amount, category, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(scope.owner())
        .bind(&draft.title)
        .bind(draft.amount)
        .bind(&draft.category)
        .bind(draft.date)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        info!("Created expense {} for user {}", expense.id, scope.owner());
        Ok(expense)
    }

    async fn list(
        &self,
        scope: OwnerScope,
        filter: &ExpenseFilter,
    ) -> DatabaseResult<Vec<Expense>> {
        let mut builder = list_query(scope, filter);
        builder
            .build_query_as::<Expense>()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        changes: &ExpenseChanges,
    ) -> DatabaseResult<Option<Expense>> {
        let mut builder = update_query(scope, id, changes);
        builder
            .build_query_as::<Expense>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn delete(&self, scope: OwnerScope, id: Uuid) -> DatabaseResult<bool> {
        let mut builder = delete_query(scope, id);
        let deleted = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        if deleted.is_some() {
            info!("Deleted expense {} for user {}", id, scope.owner());
        }
        Ok(deleted.is_some())
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        database::health_check(&self.pool).await
    }
}
