//! Percentile rank of a value within the historical distribution.

use crate::domain::error::VolstatsError;
use crate::domain::observation::Observation;

/// Rank `value` against the series volatilities, as a percentage 0-100.
///
/// Lower-bound tie semantics: elements equal to `value` count as not
/// below it. The series minimum therefore ranks at 0, a unique maximum at
/// `(n-1)/n * 100`, and only a value above every element ranks at 100.
pub fn percentile_rank(series: &[Observation], value: f64) -> Result<f64, VolstatsError> {
    if series.is_empty() {
        return Err(VolstatsError::EmptyInput {
            operation: "percentile rank".into(),
        });
    }

    let mut sorted: Vec<f64> = series.iter().map(|obs| obs.volatility).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let index = sorted.partition_point(|&v| v < value);
    Ok(index as f64 / sorted.len() as f64 * 100.0)
}
