//! Assembled analysis over one fetched series.

use crate::domain::distribution::{bin_distribution, HistogramBin, DEFAULT_BIN_COUNT};
use crate::domain::error::VolstatsError;
use crate::domain::observation::{Observation, Timeframe};
use crate::domain::percentile::percentile_rank;
use crate::domain::summary::{compute_summary, StatSummary};
use crate::domain::trend::{classify_trend, Trend};

/// Explicit analysis context: selected pair, timeframe and engine knobs.
///
/// Passed in by the caller rather than read from shared state, so a run
/// is fully determined by its arguments.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub pair: String,
    pub timeframe: Timeframe,
    /// Most recent observations to fetch.
    pub limit: usize,
    pub bin_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pair: "BTCUSDT".to_string(),
            timeframe: Timeframe::H1,
            limit: 30,
            bin_count: DEFAULT_BIN_COUNT,
        }
    }
}

/// Everything the display layer needs for one series.
#[derive(Debug, Clone)]
pub struct VolatilityAnalysis {
    pub summary: StatSummary,
    /// Percentile rank of the latest volatility within the series.
    pub percentile: f64,
    pub distribution: Vec<HistogramBin>,
    pub trend: Trend,
}

/// Run all four analyses over one snapshot of the series.
///
/// Fails with `EmptyInput` on an empty series: neither a percentile nor a
/// distribution exists over zero points, and callers are expected to fall
/// back to an empty-state rendering.
pub fn analyze(
    series: &[Observation],
    config: &AnalysisConfig,
) -> Result<VolatilityAnalysis, VolstatsError> {
    let summary = compute_summary(series);
    let percentile = percentile_rank(series, summary.current)?;
    let distribution = bin_distribution(series, config.bin_count)?;
    let trend = classify_trend(series);

    Ok(VolatilityAnalysis {
        summary,
        percentile,
        distribution,
        trend,
    })
}
