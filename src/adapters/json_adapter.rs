//! JSON file observation source.
//!
//! Reads `{PAIR}_{timeframe}.json` files holding the backend's history
//! dump: a JSON array of `{timestamp, volatility, close_price}` records.
//! Numeric fields arrive as numbers or as strings depending on the
//! backend serializer, so both are accepted and coerced.

use crate::domain::error::VolstatsError;
use crate::domain::observation::{Observation, Timeframe};
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub struct JsonAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    timestamp: String,
    volatility: RawNumber,
    close_price: RawNumber,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn as_f64(&self) -> Result<f64, VolstatsError> {
        match self {
            RawNumber::Float(v) => Ok(*v),
            RawNumber::Text(s) => s.trim().parse().map_err(|e| VolstatsError::Data {
                reason: format!("invalid numeric value {s:?}: {e}"),
            }),
        }
    }
}

impl JsonAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn series_path(&self, pair: &str, timeframe: Timeframe) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.json", pair.to_uppercase(), timeframe))
    }

    fn load_series(&self, path: &PathBuf) -> Result<Vec<Observation>, VolstatsError> {
        let content = fs::read_to_string(path).map_err(|e| VolstatsError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let raw: Vec<RawObservation> =
            serde_json::from_str(&content).map_err(|e| VolstatsError::Data {
                reason: format!("JSON parse error in {}: {}", path.display(), e),
            })?;

        let mut observations = Vec::with_capacity(raw.len());
        for record in &raw {
            let timestamp: DateTime<Utc> =
                record
                    .timestamp
                    .parse::<DateTime<Utc>>()
                    .map_err(|e| VolstatsError::Data {
                        reason: format!("invalid timestamp {:?}: {}", record.timestamp, e),
                    })?;

            observations.push(Observation {
                timestamp,
                volatility: record.volatility.as_f64()?,
                close_price: record.close_price.as_f64()?,
            });
        }

        observations.sort_by_key(|obs| obs.timestamp);
        Ok(observations)
    }
}

impl DataPort for JsonAdapter {
    fn fetch_observations(
        &self,
        pair: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Observation>, VolstatsError> {
        let path = self.series_path(pair, timeframe);
        if !path.is_file() {
            return Err(VolstatsError::NoData {
                pair: pair.to_uppercase(),
                timeframe: timeframe.to_string(),
            });
        }

        let mut observations = self.load_series(&path)?;
        if observations.len() > limit {
            observations.drain(..observations.len() - limit);
        }
        Ok(observations)
    }

    fn list_pairs(&self) -> Result<Vec<String>, VolstatsError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| VolstatsError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut pairs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VolstatsError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            let Some(stem) = name_str.strip_suffix(".json") else {
                continue;
            };
            let Some((pair, timeframe)) = stem.rsplit_once('_') else {
                continue;
            };
            if timeframe.parse::<Timeframe>().is_ok() && !pairs.contains(&pair.to_string()) {
                pairs.push(pair.to_string());
            }
        }

        pairs.sort();
        Ok(pairs)
    }

    fn data_range(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, VolstatsError> {
        let path = self.series_path(pair, timeframe);
        if !path.is_file() {
            return Ok(None);
        }

        let observations = self.load_series(&path)?;
        match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => {
                Ok(Some((first.timestamp, last.timestamp, observations.len())))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MIXED_SERIES: &str = r#"[
        {"timestamp": "2024-03-01T01:00:00Z", "volatility": "2.9", "close_price": "61900.0"},
        {"timestamp": "2024-03-01T00:00:00Z", "volatility": 2.4, "close_price": 62000.0}
    ]"#;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        fs::write(path.join("BTCUSDT_1h.json"), MIXED_SERIES).unwrap();
        fs::write(path.join("BTCUSDT_4h.json"), "[]").unwrap();
        (dir, path)
    }

    #[test]
    fn fetch_coerces_string_numerics_and_sorts() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let observations = adapter
            .fetch_observations("BTCUSDT", Timeframe::H1, 30)
            .unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].volatility, 2.4);
        assert_eq!(observations[1].volatility, 2.9);
        assert_eq!(observations[1].close_price, 61900.0);
    }

    #[test]
    fn fetch_keeps_most_recent_limit() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let observations = adapter
            .fetch_observations("BTCUSDT", Timeframe::H1, 1)
            .unwrap();

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].volatility, 2.9);
    }

    #[test]
    fn fetch_missing_series_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let err = adapter
            .fetch_observations("ETHUSDT", Timeframe::H1, 30)
            .unwrap_err();
        assert!(matches!(err, VolstatsError::NoData { .. }));
    }

    #[test]
    fn fetch_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BTCUSDT_1h.json"), "{not json").unwrap();
        let adapter = JsonAdapter::new(dir.path().to_path_buf());

        let err = adapter
            .fetch_observations("BTCUSDT", Timeframe::H1, 30)
            .unwrap_err();
        assert!(matches!(err, VolstatsError::Data { .. }));
    }

    #[test]
    fn fetch_rejects_bad_numeric_string() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("BTCUSDT_1h.json"),
            r#"[{"timestamp": "2024-03-01T00:00:00Z", "volatility": "high", "close_price": 1.0}]"#,
        )
        .unwrap();
        let adapter = JsonAdapter::new(dir.path().to_path_buf());

        let err = adapter
            .fetch_observations("BTCUSDT", Timeframe::H1, 30)
            .unwrap_err();
        assert!(matches!(err, VolstatsError::Data { .. }));
    }

    #[test]
    fn list_pairs_dedupes_across_timeframes() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        assert_eq!(adapter.list_pairs().unwrap(), vec!["BTCUSDT"]);
    }

    #[test]
    fn data_range_empty_series_is_none() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        assert!(adapter.data_range("BTCUSDT", Timeframe::H4).unwrap().is_none());
    }

    #[test]
    fn data_range_reports_span_and_count() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let (start, end, count) = adapter
            .data_range("BTCUSDT", Timeframe::H1)
            .unwrap()
            .unwrap();

        assert_eq!(start, "2024-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(end, "2024-03-01T01:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(count, 2);
    }
}
