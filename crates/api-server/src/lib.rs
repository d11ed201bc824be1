//! HTTP front end for the ratio engine.

pub mod config;
mod financial_data_routes;
mod ratio_routes;

use analysis_core::{AnalysisError, FilingsSource};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use filings_client::MockFilingsClient;
use fundamental_analysis::RatioEngine;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

const DEFAULT_LOG_FILTER: &str = "api_server=info,filings_client=info,tower_http=info";

#[derive(Clone)]
pub struct AppState {
    pub filings: Arc<dyn FilingsSource>,
    pub engine: Arc<RatioEngine>,
}

impl AppState {
    pub fn new(filings: Arc<dyn FilingsSource>) -> Self {
        Self {
            filings,
            engine: Arc::new(RatioEngine::new()),
        }
    }
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Analysis(AnalysisError::InvalidPrecondition { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Analysis(AnalysisError::UnknownMetric(_))
            | AppError::Analysis(AnalysisError::InvalidCompanyCode(_))
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Analysis(AnalysisError::DataSource(e)) => {
                tracing::error!(error = %e, "Filings source failed");
                StatusCode::BAD_GATEWAY
            }
        };

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(ratio_routes::ratio_routes())
        .merge(financial_data_routes::financial_data_routes())
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(state)
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("RATIO_API_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let state = AppState::new(Arc::new(MockFilingsClient::new(config.fiscal_year)));
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Ratio API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
