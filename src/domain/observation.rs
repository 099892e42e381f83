//! Volatility observation model.

use crate::domain::error::VolstatsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One timestamped volatility sample for a trading pair.
///
/// Series are ordered ascending by timestamp. Ordering is established by
/// the data layer when a series is loaded; the analysis functions assume
/// it and never mutate the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    /// Volatility in percent.
    pub volatility: f64,
    /// Close price in quote-currency units.
    pub close_price: f64,
}

impl Observation {
    /// volatility * close_price / 100
    pub fn volatility_points(&self) -> f64 {
        self.volatility * self.close_price / 100.0
    }
}

/// Candle timeframe of a fetched series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    H1,
    H4,
    D1,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::H1 => write!(f, "1h"),
            Timeframe::H4 => write!(f, "4h"),
            Timeframe::D1 => write!(f, "1d"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = VolstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" => Ok(Timeframe::D1),
            _ => Err(VolstatsError::InvalidTimeframe {
                value: s.to_string(),
            }),
        }
    }
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::H1, Timeframe::H4, Timeframe::D1];
}
