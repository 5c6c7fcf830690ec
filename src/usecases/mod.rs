pub mod compute_allocations;
pub mod compute_performance;
pub mod compute_summary;
pub mod holdings_query;
pub mod portfolio_service;

/// Rounds half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
