//! Summary API endpoint

use api_types::summary::SummaryView;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the expense summary
pub async fn get_summary(
    State(state): State<ServerState>,
) -> Result<Json<SummaryView>, ServerError> {
    let summary = state.engine.summary().await?;

    Ok(Json(SummaryView {
        total_expenses: summary.total_expenses,
        total_amount: summary.total_amount,
        average_amount: summary.average_amount,
        category_breakdown: summary.category_breakdown,
    }))
}
