use std::collections::HashMap;

use crate::domain::models::{Holding, PerformerView, PortfolioOverview, PortfolioSummary, RiskLevel};
use crate::errors::AnalyticsError;
use crate::usecases::round_to;

pub const HIGH_VOLATILITY_SECTORS: [&str; 3] = ["Technology", "Automotive", "Financial Services"];

const MAX_DIVERSIFICATION_SCORE: f64 = 10.0;
const SECTOR_COUNT_WEIGHT: f64 = 1.2;
const CONCENTRATION_PENALTY: f64 = 10.0;
const HIGH_CONCENTRATION_SHARE: f64 = 0.4;
const MIN_BANKING_SHARE: f64 = 0.3;

// Totals gathered in the single pass over holdings
struct Totals<'a> {
    total_value: f64,
    total_invested: f64,
    top: &'a Holding,
    worst: &'a Holding,
    sector_totals: HashMap<&'a str, f64>,
}

fn accumulate(holdings: &[Holding]) -> Result<Totals<'_>, AnalyticsError> {
    let first = holdings.first().ok_or(AnalyticsError::NoData)?;
    let mut totals = Totals {
        total_value: 0.0,
        total_invested: 0.0,
        top: first,
        worst: first,
        sector_totals: HashMap::new(),
    };

    for holding in holdings {
        totals.total_value += holding.value;
        totals.total_invested += holding.invested_value();
        if holding.gain_loss_percent > totals.top.gain_loss_percent {
            totals.top = holding;
        }
        if holding.gain_loss_percent < totals.worst.gain_loss_percent {
            totals.worst = holding;
        }
        *totals.sector_totals.entry(holding.sector.as_str()).or_insert(0.0) += holding.value;
    }
    Ok(totals)
}

fn gain_loss_percent(gain_loss: f64, invested: f64) -> Result<f64, AnalyticsError> {
    if invested == 0.0 {
        return Err(AnalyticsError::division_by_zero("total invested value is zero"));
    }
    Ok(round_to(gain_loss / invested * 100.0, 2))
}

/// Sector-count reward minus largest-sector penalty, kept within 0..=10.
pub fn diversification_score(sector_count: usize, max_sector_share: f64) -> f64 {
    let raw = sector_count as f64 * SECTOR_COUNT_WEIGHT - max_sector_share * CONCENTRATION_PENALTY;
    round_to(raw.clamp(0.0, MAX_DIVERSIFICATION_SCORE), 1)
}

pub fn classify_risk(has_high_volatility: bool, max_sector_share: f64, banking_share: f64) -> RiskLevel {
    if has_high_volatility && max_sector_share > HIGH_CONCENTRATION_SHARE {
        RiskLevel::High
    } else if has_high_volatility || banking_share < MIN_BANKING_SHARE {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn compute_summary(holdings: &[Holding]) -> Result<PortfolioSummary, AnalyticsError> {
    let totals = accumulate(holdings)?;

    let total_gain_loss = totals.total_value - totals.total_invested;
    let total_gain_loss_percent = gain_loss_percent(total_gain_loss, totals.total_invested)?;

    if totals.total_value == 0.0 {
        return Err(AnalyticsError::division_by_zero(
            "total portfolio value is zero",
        ));
    }
    let max_sector_value = totals
        .sector_totals
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let max_sector_share = max_sector_value / totals.total_value;
    let banking_share = totals.sector_totals.get("Banking").copied().unwrap_or(0.0) / totals.total_value;
    let has_high_volatility = totals
        .sector_totals
        .keys()
        .any(|sector| HIGH_VOLATILITY_SECTORS.contains(sector));

    Ok(PortfolioSummary {
        total_value: totals.total_value,
        total_invested: totals.total_invested,
        total_gain_loss,
        total_gain_loss_percent,
        top_performer: PerformerView::from(totals.top),
        worst_performer: PerformerView::from(totals.worst),
        diversification_score: diversification_score(totals.sector_totals.len(), max_sector_share),
        risk_level: classify_risk(has_high_volatility, max_sector_share, banking_share),
    })
}

pub fn compute_overview(holdings: &[Holding]) -> Result<PortfolioOverview, AnalyticsError> {
    let totals = accumulate(holdings)?;
    let total_gain_loss = totals.total_value - totals.total_invested;
    Ok(PortfolioOverview {
        total_portfolio_value: totals.total_value,
        total_investment: totals.total_invested,
        total_gain_loss,
        total_gain_loss_percent: gain_loss_percent(total_gain_loss, totals.total_invested)?,
        number_of_holdings: holdings.len(),
    })
}
