//! Fixed-bin frequency distribution of a volatility series.

use crate::domain::error::VolstatsError;
use crate::domain::observation::Observation;

pub const DEFAULT_BIN_COUNT: usize = 10;

/// One `[start, end)` interval of the partitioned value range.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Partition `[min, max]` of the series volatilities into `bins`
/// equal-width intervals and count the observations in each.
///
/// A value exactly equal to the maximum is absorbed into the last bin.
/// When every value is identical the range is zero: all bins collapse to
/// width 0 at the shared value and every observation lands in bin 0.
pub fn bin_distribution(
    series: &[Observation],
    bins: usize,
) -> Result<Vec<HistogramBin>, VolstatsError> {
    if bins == 0 {
        return Err(VolstatsError::InvalidBinCount { bins });
    }
    if series.is_empty() {
        return Err(VolstatsError::EmptyInput {
            operation: "distribution".into(),
        });
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for obs in series {
        min = min.min(obs.volatility);
        max = max.max(obs.volatility);
    }

    let range = max - min;
    let width = range / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for obs in series {
        let index = if range == 0.0 {
            0
        } else {
            (((obs.volatility - min) / width) as usize).min(bins - 1)
        };
        histogram[index].count += 1;
    }

    Ok(histogram)
}
