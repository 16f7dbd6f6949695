//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    jwt::JwtService,
    repositories::{ExpenseRepository, PgExpenseRepository, PgUserRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub expenses: Arc<dyn ExpenseRepository>,
    pub users: Arc<dyn UserRepository>,
    pub jwt_service: JwtService,
}

impl AppState {
    pub fn new(
        expenses: Arc<dyn ExpenseRepository>,
        users: Arc<dyn UserRepository>,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            expenses,
            users,
            jwt_service,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, jwt_service: JwtService) -> Self {
        Self::new(
            Arc::new(PgExpenseRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            jwt_service,
        )
    }
}
