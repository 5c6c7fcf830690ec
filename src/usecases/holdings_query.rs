use serde::Deserialize;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::models::Holding;
use crate::errors::AnalyticsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Symbol,
    CompanyName,
    Sector,
    MarketCap,
    Quantity,
    AvgPrice,
    CurrentPrice,
    Value,
    GainLoss,
    GainLossPercent,
}

impl FromStr for SortKey {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "symbol" => SortKey::Symbol,
            "companyName" => SortKey::CompanyName,
            "sector" => SortKey::Sector,
            "marketCap" => SortKey::MarketCap,
            "quantity" => SortKey::Quantity,
            "avgPrice" => SortKey::AvgPrice,
            "currentPrice" => SortKey::CurrentPrice,
            "value" => SortKey::Value,
            "gainLoss" => SortKey::GainLoss,
            "gainLossPercent" => SortKey::GainLossPercent,
            other => return Err(AnalyticsError::InvalidQuery(format!("unknown sort key '{other}'"))),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(AnalyticsError::InvalidQuery(format!("unknown sort order '{other}'"))),
        }
    }
}

/// Query-string form, parsed into a [`HoldingsQuery`] by the HTTP layer.
#[derive(Debug, Default, Deserialize)]
pub struct HoldingsQueryParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsQuery {
    pub search: Option<String>,
    pub sort: Option<(SortKey, SortOrder)>,
}

impl TryFrom<HoldingsQueryParams> for HoldingsQuery {
    type Error = AnalyticsError;

    fn try_from(params: HoldingsQueryParams) -> Result<Self, Self::Error> {
        let order: Option<SortOrder> = params.order.as_deref().map(str::parse).transpose()?;
        let sort = match params.sort.as_deref() {
            Some(key) => Some((key.parse::<SortKey>()?, order.unwrap_or_default())),
            None if order.is_some() => {
                return Err(AnalyticsError::InvalidQuery("order given without sort".to_string()));
            }
            None => None,
        };
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(HoldingsQuery { search, sort })
    }
}

fn compare(a: &Holding, b: &Holding, key: SortKey) -> Ordering {
    match key {
        SortKey::Symbol => a.symbol.cmp(&b.symbol),
        SortKey::CompanyName => a.company_name.cmp(&b.company_name),
        SortKey::Sector => a.sector.cmp(&b.sector),
        SortKey::MarketCap => a.market_cap.cmp(&b.market_cap),
        SortKey::Quantity => a.quantity.total_cmp(&b.quantity),
        SortKey::AvgPrice => a.avg_price.total_cmp(&b.avg_price),
        SortKey::CurrentPrice => a.current_price.total_cmp(&b.current_price),
        SortKey::Value => a.value.total_cmp(&b.value),
        SortKey::GainLoss => a.gain_loss.total_cmp(&b.gain_loss),
        SortKey::GainLossPercent => a.gain_loss_percent.total_cmp(&b.gain_loss_percent),
    }
}

pub fn query_holdings(holdings: &[Holding], query: &HoldingsQuery) -> Vec<Holding> {
    let needle = query.search.as_ref().map(|s| s.to_lowercase());
    let mut out: Vec<Holding> = holdings
        .iter()
        .filter(|h| match &needle {
            Some(n) => h.symbol.to_lowercase().contains(n) || h.company_name.to_lowercase().contains(n),
            None => true,
        })
        .cloned()
        .collect();

    if let Some((key, order)) = query.sort {
        out.sort_by(|a, b| {
            let ord = compare(a, b, key);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
    out
}
