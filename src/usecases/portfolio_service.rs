use std::sync::Arc;

use crate::domain::models::{
    Allocations, Holding, PerformanceReport, PortfolioOverview, PortfolioSummary, TimelinePoint,
};
use crate::domain::repository::{HoldingsRepo, RepoResult, TimelineRepo};
use crate::errors::AnalyticsError;
use crate::usecases::compute_allocations::compute_allocations;
use crate::usecases::compute_performance::compute_performance;
use crate::usecases::compute_summary::{compute_overview, compute_summary};
use crate::usecases::holdings_query::{HoldingsQuery, query_holdings};

/// Read-only view over the loaded holdings and benchmark timeline.
///
/// Both collections are fixed at construction; every operation borrows them
/// and builds fresh results, so a single instance can be shared across requests.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    holdings: Arc<[Holding]>,
    timeline: Arc<[TimelinePoint]>,
}

impl PortfolioService {
    pub fn new(holdings: Vec<Holding>, timeline: Vec<TimelinePoint>) -> Self {
        Self {
            holdings: holdings.into(),
            timeline: timeline.into(),
        }
    }

    pub fn from_repos(holdings: &dyn HoldingsRepo, timeline: &dyn TimelineRepo) -> RepoResult<Self> {
        Ok(Self::new(holdings.load_holdings()?, timeline.load_timeline()?))
    }

    pub fn holdings(&self) -> Result<&[Holding], AnalyticsError> {
        if self.holdings.is_empty() {
            return Err(AnalyticsError::NoData);
        }
        Ok(&self.holdings)
    }

    pub fn search_holdings(&self, query: &HoldingsQuery) -> Result<Vec<Holding>, AnalyticsError> {
        Ok(query_holdings(self.holdings()?, query))
    }

    pub fn allocations(&self) -> Result<Allocations, AnalyticsError> {
        compute_allocations(&self.holdings)
    }

    pub fn performance(&self) -> Result<PerformanceReport, AnalyticsError> {
        compute_performance(&self.timeline)
    }

    pub fn summary(&self) -> Result<PortfolioSummary, AnalyticsError> {
        compute_summary(&self.holdings)
    }

    pub fn overview(&self) -> Result<PortfolioOverview, AnalyticsError> {
        compute_overview(&self.holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_history::TimelineStore;
    use crate::domain::models::MarketCap;

    struct FixedHoldings(Vec<Holding>);

    impl HoldingsRepo for FixedHoldings {
        fn load_holdings(&self) -> RepoResult<Vec<Holding>> {
            Ok(self.0.clone())
        }
    }

    fn holding(symbol: &str) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            company_name: symbol.to_string(),
            sector: "Energy".to_string(),
            market_cap: MarketCap::Large,
            quantity: 2.0,
            avg_price: 100.0,
            current_price: 110.0,
            value: 220.0,
            gain_loss: 20.0,
            gain_loss_percent: 10.0,
        }
    }

    #[test]
    fn serves_injected_collections() {
        let repo = FixedHoldings(vec![holding("NTPC"), holding("ONGC")]);
        let service = PortfolioService::from_repos(&repo, &TimelineStore::builtin()).unwrap();
        assert_eq!(service.holdings().unwrap().len(), 2);
        assert_eq!(service.allocations().unwrap().by_sector["Energy"].percentage, 100.0);
        assert_eq!(service.summary().unwrap().total_value, 440.0);
        assert_eq!(service.overview().unwrap().number_of_holdings, 2);
        assert_eq!(service.performance().unwrap().returns.portfolio.one_year, 7.7);
    }

    #[test]
    fn empty_collection_reports_no_data() {
        let service = PortfolioService::new(Vec::new(), Vec::new());
        assert_eq!(service.holdings(), Err(AnalyticsError::NoData));
        assert_eq!(service.search_holdings(&HoldingsQuery::default()), Err(AnalyticsError::NoData));
        assert_eq!(service.allocations(), Err(AnalyticsError::NoData));
        assert_eq!(service.summary(), Err(AnalyticsError::NoData));
        assert!(matches!(
            service.performance(),
            Err(AnalyticsError::InsufficientHistory { actual: 0, .. })
        ));
    }
}
