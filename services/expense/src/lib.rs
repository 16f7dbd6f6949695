//! Expense tracker service
//!
//! A REST backend for per-user expense records. Every `/expence` route runs
//! behind [`middleware::auth_middleware`], which verifies the caller's token
//! and loads the user; handlers then operate on the store through an
//! [`repositories::OwnerScope`] for that user only.

pub mod config;
pub mod dates;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
