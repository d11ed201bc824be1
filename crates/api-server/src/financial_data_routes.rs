//! Financial data endpoint backed by the placeholder filings source.

use analysis_core::FinancialFigures;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{ApiResponse, AppError, AppState};

pub fn financial_data_routes() -> Router<AppState> {
    Router::new().route("/api/financial-data/:code", get(get_financial_data))
}

async fn get_financial_data(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<FinancialFigures>>, AppError> {
    let figures = state.filings.fetch_figures(&code).await?;
    Ok(Json(ApiResponse::ok(figures)))
}
