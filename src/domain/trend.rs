//! Short-term trend classification over the most recent observations.

use crate::domain::observation::Observation;
use std::fmt;

/// Observations considered by the classifier.
const TREND_WINDOW: usize = 5;
/// Percent change beyond which the trend leaves `Neutral`.
const TREND_THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "Increasing Volatility"),
            Trend::Down => write!(f, "Decreasing Volatility"),
            Trend::Neutral => write!(f, "Stable Volatility"),
        }
    }
}

/// Classify the volatility trend over the last `min(5, len)` observations
/// as the percentage change between the window's first and last values.
///
/// Fewer than two observations classify as `Neutral`, as does a window
/// starting at exactly zero: percentage change from zero is undefined.
pub fn classify_trend(series: &[Observation]) -> Trend {
    if series.len() < 2 {
        return Trend::Neutral;
    }

    let window = &series[series.len().saturating_sub(TREND_WINDOW)..];
    let first = window[0].volatility;
    let last = window[window.len() - 1].volatility;

    if first == 0.0 {
        return Trend::Neutral;
    }

    let change_pct = (last - first) / first * 100.0;
    if change_pct > TREND_THRESHOLD_PCT {
        Trend::Up
    } else if change_pct < -TREND_THRESHOLD_PCT {
        Trend::Down
    } else {
        Trend::Neutral
    }
}
