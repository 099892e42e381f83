//! Descriptive statistics over a volatility series.

use crate::domain::observation::Observation;

/// Summary statistics over the volatility field of a series.
///
/// Empty series do not fail: `current` and `points` fall back to 0 so a
/// "latest value" display always has something to show, while `mean` is
/// NaN and `max`/`min` stay at the fold identities (`f64::NEG_INFINITY` /
/// `f64::INFINITY`). Callers must check the series length before trusting
/// `mean`, `max` or `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSummary {
    pub current: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Current volatility expressed in index points:
    /// current * close_price / 100.
    pub points: f64,
}

/// Compute the summary for one snapshot of the series.
pub fn compute_summary(series: &[Observation]) -> StatSummary {
    let (current, points) = match series.last() {
        Some(obs) => (obs.volatility, obs.volatility_points()),
        None => (0.0, 0.0),
    };

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for obs in series {
        sum += obs.volatility;
        max = max.max(obs.volatility);
        min = min.min(obs.volatility);
    }

    StatSummary {
        current,
        // 0/0 on an empty series, the documented NaN sentinel.
        mean: sum / series.len() as f64,
        max,
        min,
        points,
    }
}
