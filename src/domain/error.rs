//! Domain error types.

/// Top-level error type for volstats.
#[derive(Debug, thiserror::Error)]
pub enum VolstatsError {
    #[error("no observations to compute {operation} over")]
    EmptyInput { operation: String },

    #[error("bin count must be at least 1, got {bins}")]
    InvalidBinCount { bins: usize },

    #[error("invalid timeframe {value:?} (expected 1h, 4h or 1d)")]
    InvalidTimeframe { value: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {pair} on {timeframe}")]
    NoData { pair: String, timeframe: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&VolstatsError> for std::process::ExitCode {
    fn from(err: &VolstatsError) -> Self {
        let code: u8 = match err {
            VolstatsError::Io(_) => 1,
            VolstatsError::ConfigParse { .. }
            | VolstatsError::ConfigMissing { .. }
            | VolstatsError::ConfigInvalid { .. }
            | VolstatsError::InvalidTimeframe { .. }
            | VolstatsError::InvalidBinCount { .. } => 2,
            VolstatsError::Data { .. } => 3,
            VolstatsError::EmptyInput { .. } | VolstatsError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
