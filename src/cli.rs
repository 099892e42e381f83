//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{analyze, AnalysisConfig};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::distribution::DEFAULT_BIN_COUNT;
use crate::domain::error::VolstatsError;
use crate::domain::observation::Timeframe;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "volstats", about = "Volatility series analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a volatility series and print the report
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding series files
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        pair: Option<String>,
        /// 1h, 4h or 1d
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        bins: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
        /// Series file format: csv or json
        #[arg(long)]
        format: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List pairs with series files in the data directory
    ListPairs {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        format: Option<String>,
    },
    /// Show timestamp range and observation count for series
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        pair: Option<String>,
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        format: Option<String>,
    },
}

/// On-disk format of the series files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Csv,
    Json,
}

impl FromStr for SeriesFormat {
    type Err = VolstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(SeriesFormat::Csv),
            "json" => Ok(SeriesFormat::Json),
            _ => Err(VolstatsError::ConfigInvalid {
                section: "data".to_string(),
                key: "format".to_string(),
                reason: format!("unknown format {s:?} (expected csv or json)"),
            }),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            data,
            pair,
            timeframe,
            bins,
            limit,
            format,
            output,
        } => run_analyze(
            config.as_ref(),
            data,
            pair.as_deref(),
            timeframe.as_deref(),
            bins,
            limit,
            format.as_deref(),
            output.as_ref(),
        ),
        Command::ListPairs { data, format } => run_list_pairs(&data, format.as_deref()),
        Command::Info {
            data,
            pair,
            timeframe,
            format,
        } => run_info(&data, pair.as_deref(), timeframe.as_deref(), format.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = VolstatsError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Read the analysis config from an INI adapter, falling back to the
/// defaults for missing keys.
pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, VolstatsError> {
    let defaults = AnalysisConfig::default();

    let pair = config
        .get_string("data", "pair")
        .unwrap_or(defaults.pair)
        .trim()
        .to_uppercase();

    let timeframe = match config.get_string("data", "timeframe") {
        Some(value) => value
            .parse::<Timeframe>()
            .map_err(|_| VolstatsError::ConfigInvalid {
                section: "data".to_string(),
                key: "timeframe".to_string(),
                reason: format!("unknown timeframe {value:?} (expected 1h, 4h or 1d)"),
            })?,
        None => defaults.timeframe,
    };

    Ok(AnalysisConfig {
        pair,
        timeframe,
        limit: config.get_int("data", "limit", defaults.limit as i64) as usize,
        bin_count: config.get_int("analysis", "bin_count", DEFAULT_BIN_COUNT as i64) as usize,
    })
}

/// Apply command-line overrides on top of the configured values.
pub fn apply_overrides(
    mut config: AnalysisConfig,
    pair: Option<&str>,
    timeframe: Option<&str>,
    limit: Option<usize>,
    bins: Option<usize>,
) -> Result<AnalysisConfig, VolstatsError> {
    if let Some(pair) = pair {
        config.pair = pair.trim().to_uppercase();
    }
    if let Some(timeframe) = timeframe {
        config.timeframe = timeframe.parse()?;
    }
    if let Some(limit) = limit {
        config.limit = limit;
    }
    if let Some(bins) = bins {
        if bins == 0 {
            return Err(VolstatsError::InvalidBinCount { bins });
        }
        config.bin_count = bins;
    }
    Ok(config)
}

/// Resolve the series file format: flag first, then config, then csv.
pub fn resolve_series_format(
    flag: Option<&str>,
    config: Option<&dyn ConfigPort>,
) -> Result<SeriesFormat, VolstatsError> {
    if let Some(flag) = flag {
        return flag.parse();
    }
    if let Some(config) = config {
        if let Some(value) = config.get_string("data", "format") {
            return value.parse();
        }
    }
    Ok(SeriesFormat::Csv)
}

fn make_data_port(format: SeriesFormat, base_path: PathBuf) -> Box<dyn DataPort> {
    match format {
        SeriesFormat::Csv => Box::new(CsvAdapter::new(base_path)),
        SeriesFormat::Json => Box::new(JsonAdapter::new(base_path)),
    }
}

fn run_analyze(
    config_path: Option<&PathBuf>,
    data_override: Option<PathBuf>,
    pair: Option<&str>,
    timeframe: Option<&str>,
    bins: Option<usize>,
    limit: Option<usize>,
    format: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    if let Some(ref adapter) = adapter {
        if let Err(e) = validate_analysis_config(adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 2: Build analysis config with CLI overrides
    let base = match adapter {
        Some(ref adapter) => match build_analysis_config(adapter) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => AnalysisConfig::default(),
    };

    let analysis_config = match apply_overrides(base, pair, timeframe, limit, bins) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Resolve data directory
    let data_dir = data_override.or_else(|| {
        adapter
            .as_ref()
            .and_then(|a| a.get_string("data", "path"))
            .map(PathBuf::from)
    });
    let Some(data_dir) = data_dir else {
        eprintln!("error: data directory is required (use --data or set [data] path)");
        return ExitCode::from(2);
    };

    // Stage 4: Choose the series adapter
    let format = match resolve_series_format(
        format,
        adapter.as_ref().map(|a| a as &dyn ConfigPort),
    ) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let port = make_data_port(format, data_dir);

    // Stage 5: Fetch the series
    eprintln!(
        "Fetching up to {} observations for {} ({})",
        analysis_config.limit, analysis_config.pair, analysis_config.timeframe
    );
    let series = match port.fetch_observations(
        &analysis_config.pair,
        analysis_config.timeframe,
        analysis_config.limit,
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} observations", series.len());

    // Stage 6: Run the analysis
    let analysis = match analyze(&series, &analysis_config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 7: Render the report
    match output_path {
        Some(path) => {
            let mut file = match fs::File::create(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("error: failed to create {}: {}", path.display(), e);
                    return ExitCode::from(1);
                }
            };
            if let Err(e) = TextReportAdapter.write(&analysis, &analysis_config, &mut file) {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
            eprintln!("Report written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            if let Err(e) =
                TextReportAdapter.write(&analysis, &analysis_config, &mut stdout.lock())
            {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_list_pairs(data_dir: &PathBuf, format: Option<&str>) -> ExitCode {
    let format = match resolve_series_format(format, None) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let port = make_data_port(format, data_dir.clone());

    let pairs = match port.list_pairs() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if pairs.is_empty() {
        eprintln!("No series files found in {}", data_dir.display());
    } else {
        for pair in &pairs {
            println!("{}", pair);
        }
        eprintln!("{} pairs found", pairs.len());
    }
    ExitCode::SUCCESS
}

fn run_info(
    data_dir: &PathBuf,
    pair: Option<&str>,
    timeframe: Option<&str>,
    format: Option<&str>,
) -> ExitCode {
    let format = match resolve_series_format(format, None) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let port = make_data_port(format, data_dir.clone());

    let explicit_pair = pair.is_some();
    let pairs = match pair {
        Some(p) => vec![p.trim().to_uppercase()],
        None => match port.list_pairs() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };
    if pairs.is_empty() {
        eprintln!("No series files found in {}", data_dir.display());
        return ExitCode::SUCCESS;
    }

    let timeframes: Vec<Timeframe> = match timeframe {
        Some(value) => match value.parse() {
            Ok(tf) => vec![tf],
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
        None => Timeframe::ALL.to_vec(),
    };

    for pair in &pairs {
        for &tf in &timeframes {
            match port.data_range(pair, tf) {
                Ok(Some((start, end, count))) => {
                    println!("{} {}: {} observations, {} to {}", pair, tf, count, start, end);
                }
                Ok(None) => {
                    // Only report absence when the series was asked for by name.
                    if explicit_pair || timeframe.is_some() {
                        eprintln!("{} {}: no data found", pair, tf);
                    }
                }
                Err(e) => {
                    eprintln!("error querying {} {}: {}", pair, tf, e);
                }
            }
        }
    }
    ExitCode::SUCCESS
}
