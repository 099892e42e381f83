//! Plain-text report adapter implementing ReportPort.
//!
//! Presentation formatting (two-decimal rounding, bar scaling) happens
//! here; the analysis itself carries full-precision values.

use crate::domain::analysis::{AnalysisConfig, VolatilityAnalysis};
use crate::domain::error::VolstatsError;
use crate::ports::report_port::ReportPort;
use std::io::Write;

/// Width of the modal histogram bar in characters.
const BAR_WIDTH: usize = 40;

pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        analysis: &VolatilityAnalysis,
        config: &AnalysisConfig,
        out: &mut dyn Write,
    ) -> Result<(), VolstatsError> {
        let summary = &analysis.summary;

        writeln!(
            out,
            "=== Volatility Analysis: {} ({}) ===",
            config.pair, config.timeframe
        )?;
        writeln!(out)?;
        writeln!(out, "Current:  {:.2}%", summary.current)?;
        writeln!(out, "Points:   {:.2}", summary.points)?;
        writeln!(out, "Mean:     {:.2}%", summary.mean)?;
        writeln!(out, "Max:      {:.2}%", summary.max)?;
        writeln!(out, "Min:      {:.2}%", summary.min)?;
        writeln!(out)?;
        writeln!(out, "Trend: {}", analysis.trend)?;
        writeln!(
            out,
            "Current volatility ({:.2}%) is in the {:.1}th percentile of historical values",
            summary.current, analysis.percentile
        )?;
        writeln!(out)?;
        writeln!(out, "Distribution:")?;

        let modal_count = analysis
            .distribution
            .iter()
            .map(|bin| bin.count)
            .max()
            .unwrap_or(0);

        for bin in &analysis.distribution {
            let bar_len = if modal_count > 0 {
                bin.count * BAR_WIDTH / modal_count
            } else {
                0
            };
            writeln!(
                out,
                "  {:>8.2} - {:<8.2} |{:<width$}| {}",
                bin.start,
                bin.end,
                "#".repeat(bar_len),
                bin.count,
                width = BAR_WIDTH
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::analyze;
    use crate::domain::observation::Observation;

    fn make_series(volatilities: &[f64]) -> Vec<Observation> {
        volatilities
            .iter()
            .enumerate()
            .map(|(i, &volatility)| Observation {
                timestamp: "2024-03-01T00:00:00Z".parse::<chrono::DateTime<chrono::Utc>>()
                    .unwrap()
                    + chrono::Duration::hours(i as i64),
                volatility,
                close_price: 100.0,
            })
            .collect()
    }

    fn render(volatilities: &[f64], config: &AnalysisConfig) -> String {
        let series = make_series(volatilities);
        let analysis = analyze(&series, config).unwrap();
        let mut out = Vec::new();
        TextReportAdapter.write(&analysis, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_contains_header_and_stats() {
        let config = AnalysisConfig::default();
        let report = render(&[10.0, 20.0, 30.0, 40.0, 50.0], &config);

        assert!(report.contains("=== Volatility Analysis: BTCUSDT (1h) ==="));
        assert!(report.contains("Current:  50.00%"));
        assert!(report.contains("Mean:     30.00%"));
        assert!(report.contains("Max:      50.00%"));
        assert!(report.contains("Min:      10.00%"));
    }

    #[test]
    fn report_contains_percentile_sentence_and_trend() {
        let config = AnalysisConfig::default();
        let report = render(&[10.0, 20.0, 30.0, 40.0, 50.0], &config);

        assert!(report.contains(
            "Current volatility (50.00%) is in the 80.0th percentile of historical values"
        ));
        assert!(report.contains("Trend: Increasing Volatility"));
    }

    #[test]
    fn report_renders_one_row_per_bin() {
        let config = AnalysisConfig {
            bin_count: 4,
            ..AnalysisConfig::default()
        };
        let report = render(&[1.0, 2.0, 3.0, 4.0], &config);

        let rows = report.lines().filter(|l| l.contains('|')).count();
        assert_eq!(rows, 4);
    }

    #[test]
    fn report_scales_modal_bin_to_full_width() {
        let config = AnalysisConfig {
            bin_count: 2,
            ..AnalysisConfig::default()
        };
        // Three values in the lower half, one in the upper.
        let report = render(&[1.0, 1.1, 1.2, 2.0], &config);

        assert!(report.contains(&"#".repeat(BAR_WIDTH)));
    }
}
