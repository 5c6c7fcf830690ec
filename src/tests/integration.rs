use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use crate::app::{AppState, create_app};
use crate::csv_history::default_timeline;
use crate::domain::models::{Holding, MarketCap};
use crate::usecases::portfolio_service::PortfolioService;

fn make_holding(symbol: &str, sector: &str, cap: MarketCap, value: f64, qty: f64, avg: f64, pct: f64) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        company_name: format!("{symbol} Limited"),
        sector: sector.to_string(),
        market_cap: cap,
        quantity: qty,
        avg_price: avg,
        current_price: value / qty,
        value,
        gain_loss: value - qty * avg,
        gain_loss_percent: pct,
    }
}

fn sample_app() -> Router {
    let holdings = vec![
        make_holding("TECH", "Tech", MarketCap::Large, 600000.0, 100.0, 5000.0, 20.0),
        make_holding("BANK", "Banking", MarketCap::Mid, 400000.0, 200.0, 2500.0, -10.0),
    ];
    create_app(AppState::new(PortfolioService::new(holdings, default_timeline())))
}

fn empty_app() -> Router {
    create_app(AppState::new(PortfolioService::new(Vec::new(), Vec::new())))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_holdings_route_returns_array() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/holdings").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["symbol"], "TECH");
    assert_eq!(rows[0]["marketCap"], "Large Cap");
    assert_eq!(rows[1]["gainLossPercent"], -10.0);
}

#[tokio::test]
async fn test_allocations_route() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/allocations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bySector"]["Tech"]["value"], 600000.0);
    assert_eq!(json["bySector"]["Tech"]["percentage"], 60.0);
    assert_eq!(json["bySector"]["Banking"]["percentage"], 40.0);
    assert_eq!(json["byMarketCap"]["Mid Cap"]["percentage"], 40.0);
}

#[tokio::test]
async fn test_performance_route() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/performance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timeline"].as_array().unwrap().len(), 6);
    assert_eq!(json["timeline"][0]["date"], "2024-01-01");
    assert_eq!(json["returns"]["portfolio"]["1month"], 0.7);
    assert_eq!(json["returns"]["portfolio"]["1year"], 7.7);
    assert!(json["returns"]["gold"]["3months"].is_number());
}

#[tokio::test]
async fn test_summary_route() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalInvested"], 1000000.0);
    assert_eq!(json["totalGainLoss"], 0.0);
    assert_eq!(json["topPerformer"]["symbol"], "TECH");
    assert_eq!(json["topPerformer"]["gainPercent"], 20.0);
    assert_eq!(json["worstPerformer"]["symbol"], "BANK");
    assert_eq!(json["riskLevel"], "Low");
}

#[tokio::test]
async fn test_overview_route_wraps_data() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["numberOfHoldings"], 2);
    assert_eq!(json["data"]["totalPortfolioValue"], 1000000.0);
}

#[tokio::test]
async fn test_search_route_filters_and_sorts() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/holdings/search?sort=value&order=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["symbol"], "BANK");

    let (_, json) = get_json(sample_app(), "/api/portfolio/holdings/search?search=tec").await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, json) = get_json(sample_app(), "/api/portfolio/holdings/search?sort=pe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidQuery");
}

#[tokio::test]
async fn test_empty_dataset_reports_no_data() {
    for uri in [
        "/api/portfolio/holdings",
        "/api/portfolio/allocations",
        "/api/portfolio/summary",
        "/api/portfolio/overview",
    ] {
        let (status, json) = get_json(empty_app(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "NoData");
    }

    let (status, json) = get_json(empty_app(), "/api/portfolio/performance").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "InsufficientHistory");
}

#[tokio::test]
async fn test_unknown_route_and_health() {
    let (status, json) = get_json(sample_app(), "/api/portfolio/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "API endpoint not found");

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = sample_app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}
