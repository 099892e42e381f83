//! CSV file observation source.
//!
//! Reads `{PAIR}_{timeframe}.csv` files with a
//! `timestamp,volatility,close_price` header. Rows are sorted ascending
//! by timestamp after load, then trimmed to the most recent `limit`.

use crate::domain::error::VolstatsError;
use crate::domain::observation::{Observation, Timeframe};
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn series_path(&self, pair: &str, timeframe: Timeframe) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", pair.to_uppercase(), timeframe))
    }

    fn load_series(&self, path: &PathBuf) -> Result<Vec<Observation>, VolstatsError> {
        let content = fs::read_to_string(path).map_err(|e| VolstatsError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| VolstatsError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let timestamp_str = record.get(0).ok_or_else(|| VolstatsError::Data {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp: DateTime<Utc> = timestamp_str
                .parse::<DateTime<Utc>>()
                .map_err(|e| VolstatsError::Data {
                    reason: format!("invalid timestamp {timestamp_str:?}: {e}"),
                })?;

            let volatility: f64 = record
                .get(1)
                .ok_or_else(|| VolstatsError::Data {
                    reason: "missing volatility column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| VolstatsError::Data {
                    reason: format!("invalid volatility value: {}", e),
                })?;

            let close_price: f64 = record
                .get(2)
                .ok_or_else(|| VolstatsError::Data {
                    reason: "missing close_price column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| VolstatsError::Data {
                    reason: format!("invalid close_price value: {}", e),
                })?;

            observations.push(Observation {
                timestamp,
                volatility,
                close_price,
            });
        }

        observations.sort_by_key(|obs| obs.timestamp);
        Ok(observations)
    }
}

impl DataPort for CsvAdapter {
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

            let Some(stem) = name_str.strip_suffix(".csv") else {
                continue;
            };
            // Pair files are named {PAIR}_{timeframe}.csv.
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
