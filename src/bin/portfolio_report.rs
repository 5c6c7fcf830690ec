use anyhow::{Context, Result};
use dotenv::dotenv;
use serde_json::json;
use std::env;
use std::path::PathBuf;

use portfolio_analytics::config::DEFAULT_HOLDINGS_PATH;
use portfolio_analytics::csv_history::TimelineStore;
use portfolio_analytics::csv_store::FileHoldingsStore;
use portfolio_analytics::usecases::portfolio_service::PortfolioService;

// Usage: portfolio_report [holdings.json|holdings.csv] [timeline.csv]
fn main() -> Result<()> {
    dotenv().ok();

    let holdings_path = env::args()
        .nth(1)
        .or_else(|| env::var("HOLDINGS_PATH").ok())
        .unwrap_or_else(|| DEFAULT_HOLDINGS_PATH.to_string());
    let timeline_path = env::args()
        .nth(2)
        .or_else(|| env::var("TIMELINE_PATH").ok())
        .map(PathBuf::from);

    let service = PortfolioService::from_repos(
        &FileHoldingsStore::new(&holdings_path),
        &TimelineStore::new(timeline_path),
    )
    .with_context(|| format!("loading fixtures from '{}'", holdings_path))?;

    let report = json!({
        "holdings": service.holdings()?.len(),
        "summary": service.summary()?,
        "allocations": service.allocations()?,
        "performance": service.performance()?.returns,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
