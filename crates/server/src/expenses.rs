//! Expenses API endpoints

use api_types::expense::{ExpenseDeleted, ExpenseNew, ExpenseView};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        description: expense.description,
        amount: expense.amount,
        category: expense.category,
        date: expense.date,
        created_at: expense.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(expenses))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Path(id) = id?;
    let expense = state.engine.expense(id).await?;
    Ok(Json(map_expense(expense)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let Json(payload) = payload?;

    let expense = state
        .engine
        .create_expense(engine::ExpenseInput {
            description: payload.description,
            amount: payload.amount,
            category: payload.category,
            date: payload.date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ExpenseDeleted>, ServerError> {
    let Path(id) = id?;
    state.engine.delete_expense(id).await?;

    Ok(Json(ExpenseDeleted {
        message: "Expense deleted successfully".to_string(),
    }))
}
