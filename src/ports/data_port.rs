//! Observation source port trait.

use crate::domain::error::VolstatsError;
use crate::domain::observation::{Observation, Timeframe};
use chrono::{DateTime, Utc};

/// A source of volatility series, keyed by trading pair and timeframe.
///
/// Implementations return observations sorted ascending by timestamp;
/// the analysis functions rely on that ordering.
pub trait DataPort {
    /// Fetch up to `limit` of the most recent observations.
    fn fetch_observations(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Observation>, VolstatsError>;

    /// Pairs for which at least one series exists.
    fn list_pairs(&self) -> Result<Vec<String>, VolstatsError>;

    /// Timestamp range and observation count of a series, or `None` when
    /// no series exists for the pair and timeframe.
    fn data_range(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, VolstatsError>;
}
