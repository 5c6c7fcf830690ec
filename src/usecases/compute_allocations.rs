use std::collections::BTreeMap;

use crate::domain::models::{AllocationBucket, Allocations, Holding};
use crate::errors::AnalyticsError;
use crate::usecases::round_to;

pub fn compute_allocations(holdings: &[Holding]) -> Result<Allocations, AnalyticsError> {
    if holdings.is_empty() {
        return Err(AnalyticsError::NoData);
    }

    let mut sector_values: BTreeMap<String, f64> = BTreeMap::new();
    let mut cap_values: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_value = 0.0;

    for holding in holdings {
        *sector_values.entry(holding.sector.clone()).or_insert(0.0) += holding.value;
        *cap_values
            .entry(holding.market_cap.label().to_string())
            .or_insert(0.0) += holding.value;
        total_value += holding.value;
    }

    if total_value == 0.0 {
        return Err(AnalyticsError::division_by_zero(
            "total portfolio value is zero",
        ));
    }

    Ok(Allocations {
        by_sector: into_buckets(sector_values, total_value),
        by_market_cap: into_buckets(cap_values, total_value),
    })
}

fn into_buckets(values: BTreeMap<String, f64>, total_value: f64) -> BTreeMap<String, AllocationBucket> {
    values
        .into_iter()
        .map(|(key, value)| {
            let percentage = round_to(value / total_value * 100.0, 1);
            (key, AllocationBucket { value, percentage })
        })
        .collect()
}
