use crate::domain::models::{BenchmarkReturns, PerformanceReport, TimelinePoint, WindowReturns};
use crate::errors::AnalyticsError;
use crate::usecases::round_to;

/// Points needed to resolve every window: current, 1 month back, 3 months back.
pub const MIN_TIMELINE_POINTS: usize = 4;

/// Percentage change from `previous` to `current`, one decimal place.
pub fn compute_return(current: f64, previous: f64) -> Result<f64, AnalyticsError> {
    if !current.is_finite() || !previous.is_finite() {
        return Err(AnalyticsError::NonFiniteValue {
            context: format!("return from {previous} to {current}"),
        });
    }
    if previous == 0.0 {
        return Err(AnalyticsError::division_by_zero(
            "baseline value for return is zero",
        ));
    }
    Ok(round_to((current - previous) / previous * 100.0, 1))
}

pub fn compute_performance(timeline: &[TimelinePoint]) -> Result<PerformanceReport, AnalyticsError> {
    if timeline.len() < MIN_TIMELINE_POINTS {
        return Err(AnalyticsError::InsufficientHistory {
            required: MIN_TIMELINE_POINTS,
            actual: timeline.len(),
        });
    }
    if let Some(pos) = timeline.windows(2).position(|w| w[0].date >= w[1].date) {
        return Err(AnalyticsError::UnorderedTimeline { index: pos + 1 });
    }

    let last = timeline.len() - 1;
    let current = &timeline[last];
    let one_month_ago = &timeline[last - 1];
    let three_months_ago = &timeline[last - 3];
    let one_year_ago = &timeline[0];

    let window_returns = |series: fn(&TimelinePoint) -> f64| -> Result<WindowReturns, AnalyticsError> {
        Ok(WindowReturns {
            one_month: compute_return(series(current), series(one_month_ago))?,
            three_months: compute_return(series(current), series(three_months_ago))?,
            one_year: compute_return(series(current), series(one_year_ago))?,
        })
    };

    let returns = BenchmarkReturns {
        portfolio: window_returns(|p| p.portfolio)?,
        nifty50: window_returns(|p| p.nifty50)?,
        gold: window_returns(|p| p.gold)?,
    };

    Ok(PerformanceReport {
        timeline: timeline.to_vec(),
        returns,
    })
}
