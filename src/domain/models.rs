use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Size bucket of a listed company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketCap {
    #[serde(rename = "Large Cap")]
    Large,
    #[serde(rename = "Mid Cap")]
    Mid,
    #[serde(rename = "Small Cap")]
    Small,
}

impl MarketCap {
    pub fn label(&self) -> &'static str {
        match self {
            MarketCap::Large => "Large Cap",
            MarketCap::Mid => "Mid Cap",
            MarketCap::Small => "Small Cap",
        }
    }

    /// Accepts the display labels, case-insensitively and ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        [MarketCap::Large, MarketCap::Mid, MarketCap::Small]
            .into_iter()
            .find(|cap| cap.label().eq_ignore_ascii_case(s))
    }
}

// One owned position, numeric fields already coerced; built only through `TryFrom<RawHolding>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub company_name: String,
    pub sector: String,
    pub market_cap: MarketCap,
    pub quantity: f64,
    pub avg_price: f64,
    pub current_price: f64,
    pub value: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
}

impl Holding {
    pub fn invested_value(&self) -> f64 {
        self.quantity * self.avg_price
    }
}

// One sample of the benchmark history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub portfolio: f64,
    pub nifty50: f64,
    pub gold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBucket {
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocations {
    pub by_sector: BTreeMap<String, AllocationBucket>,
    pub by_market_cap: BTreeMap<String, AllocationBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowReturns {
    #[serde(rename = "1month")]
    pub one_month: f64,
    #[serde(rename = "3months")]
    pub three_months: f64,
    #[serde(rename = "1year")]
    pub one_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReturns {
    pub portfolio: WindowReturns,
    pub nifty50: WindowReturns,
    pub gold: WindowReturns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub timeline: Vec<TimelinePoint>,
    pub returns: BenchmarkReturns,
}

// Reduced view of a holding for the best/worst cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerView {
    pub symbol: String,
    pub name: String,
    pub gain_percent: f64,
}

impl From<&Holding> for PerformerView {
    fn from(h: &Holding) -> Self {
        Self {
            symbol: h.symbol.clone(),
            name: h.company_name.clone(),
            gain_percent: h.gain_loss_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub top_performer: PerformerView,
    pub worst_performer: PerformerView,
    pub diversification_score: f64,
    pub risk_level: RiskLevel,
}

// Headline figures for the overview card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub total_portfolio_value: f64,
    pub total_investment: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: f64,
    pub number_of_holdings: usize,
}
