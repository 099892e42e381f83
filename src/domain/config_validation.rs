//! Configuration validation.
//!
//! Validates analysis config values before a run.

use crate::domain::error::VolstatsError;
use crate::domain::observation::Timeframe;
use crate::ports::config_port::ConfigPort;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), VolstatsError> {
    validate_pair(config)?;
    validate_timeframe(config)?;
    validate_limit(config)?;
    validate_bin_count(config)?;
    Ok(())
}

fn validate_pair(config: &dyn ConfigPort) -> Result<(), VolstatsError> {
    if let Some(pair) = config.get_string("data", "pair") {
        if pair.trim().is_empty() {
            return Err(VolstatsError::ConfigInvalid {
                section: "data".to_string(),
                key: "pair".to_string(),
                reason: "pair must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), VolstatsError> {
    if let Some(value) = config.get_string("data", "timeframe") {
        value
            .parse::<Timeframe>()
            .map_err(|_| VolstatsError::ConfigInvalid {
                section: "data".to_string(),
                key: "timeframe".to_string(),
                reason: format!("unknown timeframe {value:?} (expected 1h, 4h or 1d)"),
            })?;
    }
    Ok(())
}

fn validate_limit(config: &dyn ConfigPort) -> Result<(), VolstatsError> {
    let limit = config.get_int("data", "limit", 30);
    if limit < 1 {
        return Err(VolstatsError::ConfigInvalid {
            section: "data".to_string(),
            key: "limit".to_string(),
            reason: "limit must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_bin_count(config: &dyn ConfigPort) -> Result<(), VolstatsError> {
    let bin_count = config.get_int("analysis", "bin_count", 10);
    if bin_count < 1 {
        return Err(VolstatsError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "bin_count".to_string(),
            reason: "bin_count must be at least 1".to_string(),
        });
    }
    Ok(())
}
