use axum::Router;
use dotenv::dotenv;
use std::net::SocketAddr;
use tracing::{error, info, warn};

use portfolio_analytics::app::{AppState, create_app};
use portfolio_analytics::config::AppConfig;
use portfolio_analytics::csv_history::TimelineStore;
use portfolio_analytics::csv_store::FileHoldingsStore;
use portfolio_analytics::domain::repository::{HoldingsRepo, TimelineRepo};
use portfolio_analytics::logging::{LoggingConfig, init_logging};
use portfolio_analytics::usecases::portfolio_service::PortfolioService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_logging(&LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!(e))?;
    let config = AppConfig::from_env();

    // A failed load is reported once here; the routes then answer NoData
    let holdings = match FileHoldingsStore::new(&config.holdings_path).load_holdings() {
        Ok(h) => {
            info!(path = %config.holdings_path.display(), count = h.len(), "Loaded holdings");
            h
        }
        Err(e) => {
            error!(path = %config.holdings_path.display(), error = %e, "Failed loading holdings");
            Vec::new()
        }
    };
    let timeline = match TimelineStore::new(config.timeline_path.clone()).load_timeline() {
        Ok(t) => {
            info!(points = t.len(), source = ?config.timeline_path, "Loaded benchmark timeline");
            t
        }
        Err(e) => {
            error!(source = ?config.timeline_path, error = %e, "Failed loading benchmark timeline");
            Vec::new()
        }
    };

    let app = create_app(AppState::new(PortfolioService::new(holdings, timeline)));
    serve(app, &config).await;
    Ok(())
}

async fn serve(app: Router, config: &AppConfig) {
    // Try to bind to the requested port; if it's in use, try a few subsequent ports.
    for offset in 0..config.port_attempts {
        let Some(try_port) = config.port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(config.host, try_port);
        match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => {
                info!(%addr, "Listening");
                if let Err(e) = axum::serve(listener, app).await {
                    error!(error = %e, "Server failed while serving");
                }
                return;
            }
            Err(e) => {
                warn!(port = try_port, error = %e, "Port unavailable, trying next");
            }
        }
    }
    error!(
        "Failed to bind to any port in range {}..{}",
        config.port,
        config.port.saturating_add(config.port_attempts.saturating_sub(1))
    );
}
