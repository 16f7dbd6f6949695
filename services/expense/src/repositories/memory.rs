//! In-memory repositories for router tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ExpenseRepository, OwnerScope, UserRepository};
use crate::models::{Expense, ExpenseChanges, ExpenseDraft, ExpenseFilter, User};

fn matches(filter: &ExpenseFilter, expense: &Expense) -> bool {
    filter
        .category
        .as_ref()
        .is_none_or(|category| &expense.category == category)
        && filter.from.is_none_or(|from| expense.date >= from)
        && filter.until.is_none_or(|until| expense.date <= until)
}

#[derive(Clone, Default)]
pub struct InMemoryExpenseRepository {
    expenses: Arc<Mutex<Vec<Expense>>>,
}

impl InMemoryExpenseRepository {
    /// Every stored expense regardless of owner
    pub async fn all(&self) -> Vec<Expense> {
        self.expenses.lock().await.clone()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn create(&self, scope: OwnerScope, draft: &ExpenseDraft) -> DatabaseResult<Expense> {
        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            owner: scope.owner(),
            title: draft.title.clone(),
            amount: draft.amount,
            category: draft.category.clone(),
            date: draft.date,
            created_at: now,
            updated_at: now,
        };

        self.expenses.lock().await.push(expense.clone());
        Ok(expense)
    }

    async fn list(
        &self,
        scope: OwnerScope,
        filter: &ExpenseFilter,
    ) -> DatabaseResult<Vec<Expense>> {
        let mut found: Vec<Expense> = self
            .expenses
            .lock()
            .await
            .iter()
            .filter(|e| scope.permits(e) && matches(filter, e))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(found)
    }

    async fn update(
        &self,
        scope: OwnerScope,
        id: Uuid,
        changes: &ExpenseChanges,
    ) -> DatabaseResult<Option<Expense>> {
        let mut expenses = self.expenses.lock().await;
        let Some(expense) = expenses
            .iter_mut()
            .find(|e| e.id == id && scope.permits(e))
        else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            expense.title = title.clone();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(category) = &changes.category {
            expense.category = category.clone();
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        expense.updated_at = Utc::now();

        Ok(Some(expense.clone()))
    }

    async fn delete(&self, scope: OwnerScope, id: Uuid) -> DatabaseResult<bool> {
        let mut expenses = self.expenses.lock().await;
        let before = expenses.len();
        expenses.retain(|e| !(e.id == id && scope.permits(e)));
        Ok(expenses.len() < before)
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Register a user and return it
    pub async fn insert(&self, name: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            created_at: now,
            updated_at: now,
        };

        self.users.lock().await.insert(user.id, user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }
}
