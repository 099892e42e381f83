#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use volstats::domain::error::VolstatsError;
pub use volstats::domain::observation::{Observation, Timeframe};
use volstats::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<(String, Timeframe), Vec<Observation>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(
        mut self,
        pair: &str,
        timeframe: Timeframe,
        series: Vec<Observation>,
    ) -> Self {
        self.data.insert((pair.to_string(), timeframe), series);
        self
    }

    pub fn with_error(mut self, pair: &str, reason: &str) -> Self {
        self.errors.insert(pair.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_observations(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Observation>, VolstatsError> {
        if let Some(reason) = self.errors.get(pair) {
            return Err(VolstatsError::Data {
                reason: reason.clone(),
            });
        }
        let mut series = self
            .data
            .get(&(pair.to_string(), timeframe))
            .cloned()
            .ok_or_else(|| VolstatsError::NoData {
                pair: pair.to_string(),
                timeframe: timeframe.to_string(),
            })?;
        if series.len() > limit {
            series.drain(..series.len() - limit);
        }
        Ok(series)
    }

    fn list_pairs(&self) -> Result<Vec<String>, VolstatsError> {
        let mut pairs: Vec<String> = self.data.keys().map(|(pair, _)| pair.clone()).collect();
        pairs.sort();
        pairs.dedup();
        Ok(pairs)
    }

    fn data_range(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, VolstatsError> {
        match self.data.get(&(pair.to_string(), timeframe)) {
            Some(series) if !series.is_empty() => Ok(Some((
                series.first().unwrap().timestamp,
                series.last().unwrap().timestamp,
                series.len(),
            ))),
            _ => Ok(None),
        }
    }
}

pub fn base_time() -> DateTime<Utc> {
    "2024-03-01T00:00:00Z".parse().unwrap()
}

pub fn make_observation(hours: i64, volatility: f64, close_price: f64) -> Observation {
    Observation {
        timestamp: base_time() + Duration::hours(hours),
        volatility,
        close_price,
    }
}

/// Hourly observations at a constant close price of 100.
pub fn make_series(volatilities: &[f64]) -> Vec<Observation> {
    volatilities
        .iter()
        .enumerate()
        .map(|(i, &volatility)| make_observation(i as i64, volatility, 100.0))
        .collect()
}
