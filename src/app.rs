use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::models::{Allocations, Holding, PerformanceReport, PortfolioSummary};
use crate::errors::AnalyticsError;
use crate::usecases::holdings_query::{HoldingsQuery, HoldingsQueryParams};
use crate::usecases::portfolio_service::PortfolioService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(service: PortfolioService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/portfolio", portfolio_router())
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
}

fn portfolio_router() -> Router<AppState> {
    Router::new()
        .route("/holdings", get(api_holdings))
        .route("/holdings/search", get(api_search_holdings))
        .route("/allocations", get(api_allocations))
        .route("/performance", get(api_performance))
        .route("/summary", get(api_summary))
        .route("/overview", get(api_overview))
}

fn logged<T>(operation: &'static str, result: Result<T, AnalyticsError>) -> Result<T, AnalyticsError> {
    if let Err(e) = &result {
        warn!(operation, error = %e, "Portfolio request failed");
    }
    result
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "message": "API endpoint not found"})),
    )
}

#[tracing::instrument(skip(state))]
async fn api_holdings(State(state): State<AppState>) -> Result<Json<Vec<Holding>>, AnalyticsError> {
    logged("holdings", state.service.holdings().map(|h| Json(h.to_vec())))
}

#[tracing::instrument(skip(state))]
async fn api_search_holdings(
    State(state): State<AppState>,
    Query(params): Query<HoldingsQueryParams>,
) -> Result<Json<Vec<Holding>>, AnalyticsError> {
    let result = HoldingsQuery::try_from(params).and_then(|q| state.service.search_holdings(&q));
    logged("search_holdings", result.map(Json))
}

#[tracing::instrument(skip(state))]
async fn api_allocations(State(state): State<AppState>) -> Result<Json<Allocations>, AnalyticsError> {
    logged("allocations", state.service.allocations().map(Json))
}

#[tracing::instrument(skip(state))]
async fn api_performance(State(state): State<AppState>) -> Result<Json<PerformanceReport>, AnalyticsError> {
    logged("performance", state.service.performance().map(Json))
}

#[tracing::instrument(skip(state))]
async fn api_summary(State(state): State<AppState>) -> Result<Json<PortfolioSummary>, AnalyticsError> {
    logged("summary", state.service.summary().map(Json))
}

#[tracing::instrument(skip(state))]
async fn api_overview(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AnalyticsError> {
    let overview = logged("overview", state.service.overview())?;
    Ok(Json(json!({"success": true, "data": overview})))
}
