//! Expense service routes

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get, post, put},
};
use chrono::Utc;
use serde_json::json;
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{CurrentUser, auth_middleware},
    models::{CreateExpenseRequest, ExpenseQuery, UpdateExpenseRequest},
    repositories::OwnerScope,
    state::AppState,
    validation,
};

/// Path prefix the expense routes are mounted under
pub const EXPENSE_PREFIX: &str = "/expence";

/// Create the router for the expense service
pub fn create_router(state: AppState) -> Router {
    let expense_routes = Router::new()
        .route(EXPENSE_PREFIX, collection_routes())
        .route(&format!("{EXPENSE_PREFIX}/"), collection_routes())
        .route(
            &format!("{EXPENSE_PREFIX}/:id"),
            put(update_expense).delete(delete_expense),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .merge(expense_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/expence` and `/expence/` both address the collection
fn collection_routes() -> MethodRouter<AppState> {
    post(create_expense).get(list_expenses)
}

/// Root banner
pub async fn welcome() -> &'static str {
    "welcome to my expence tracker Backend"
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.expenses.health_check().await.unwrap_or(false);

    let (status, label) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(json!({
            "status": label,
            "service": "expense-service"
        })),
    )
}

/// Create an expense owned by the caller
pub async fn create_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    // A request without a JSON body carries no fields at all.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateExpenseRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let draft =
        validation::validate_new_expense(payload, Utc::now()).map_err(ApiError::Validation)?;

    let expense = state
        .expenses
        .create(OwnerScope::scoped_to_owner(user.id), &draft)
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// List the caller's expenses, newest first
pub async fn list_expenses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let filter = validation::validate_filter(query).map_err(ApiError::Validation)?;

    let expenses = state
        .expenses
        .list(OwnerScope::scoped_to_owner(user.id), &filter)
        .await?;

    Ok(Json(expenses))
}

/// Apply a partial update to one of the caller's expenses
pub async fn update_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateExpenseRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    // An id that cannot exist is reported the same way as one that does not.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::expense_not_found())?;
    let Json(payload) = payload?;
    let changes = validation::validate_changes(payload).map_err(ApiError::Validation)?;

    let expense = state
        .expenses
        .update(OwnerScope::scoped_to_owner(user.id), id, &changes)
        .await?
        .ok_or_else(ApiError::expense_not_found)?;

    info!("Updated expense {} for user {}", expense.id, user.id);
    Ok(Json(expense))
}

/// Delete one of the caller's expenses
pub async fn delete_expense(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::expense_not_found())?;

    let deleted = state
        .expenses
        .delete(OwnerScope::scoped_to_owner(user.id), id)
        .await?;

    if deleted {
        Ok(Json(json!({ "message": "Expense deleted successfully" })))
    } else {
        Err(ApiError::expense_not_found())
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Catch-all responder for handler panics
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Server Error" })),
    )
        .into_response()
}
