//! Ratio API Routes
//!
//! Single-metric evaluation, the metric catalogue and the per-company report.

use analysis_core::{Metric, MetricUnit};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use fundamental_analysis::{Evaluation, RatioReport};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize)]
pub struct RatioRequest {
    /// Numerator side (e.g. market cap for PSR, current revenue for growth)
    pub value: f64,
    /// Denominator side; must be positive
    pub base: f64,
}

#[derive(Serialize)]
pub struct MetricInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: MetricUnit,
    pub value_operand: &'static str,
    pub base_operand: &'static str,
}

pub fn ratio_routes() -> Router<AppState> {
    Router::new()
        .route("/api/metrics", get(list_metrics))
        .route("/api/ratios/:metric", post(evaluate_ratio))
        .route("/api/ratios/report/:code", get(company_report))
}

async fn list_metrics() -> Json<ApiResponse<Vec<MetricInfo>>> {
    let metrics = Metric::ALL
        .iter()
        .map(|m| {
            let (value_operand, base_operand) = m.operand_names();
            MetricInfo {
                key: m.key(),
                name: m.name(),
                unit: m.unit(),
                value_operand,
                base_operand,
            }
        })
        .collect();
    Json(ApiResponse::ok(metrics))
}

async fn evaluate_ratio(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    request: Result<Json<RatioRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Evaluation>>, AppError> {
    let metric: Metric = metric.parse()?;
    let Json(request) = request?;
    let evaluation = state.engine.evaluate(metric, request.value, request.base)?;
    tracing::debug!(
        metric = %metric,
        value = evaluation.value,
        level = evaluation.judgment.level,
        "Evaluated ratio"
    );
    Ok(Json(ApiResponse::ok(evaluation)))
}

async fn company_report(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<RatioReport>>, AppError> {
    let figures = state.filings.fetch_figures(&code).await?;
    let report = state.engine.report(&figures);
    tracing::info!(
        company = %report.company_code,
        judged = report.judged_count(),
        "Built ratio report"
    );
    Ok(Json(ApiResponse::ok(report)))
}
