//! Report rendering port trait.

use crate::domain::analysis::{AnalysisConfig, VolatilityAnalysis};
use crate::domain::error::VolstatsError;
use std::io::Write;

/// Port for rendering a finished analysis for display.
///
/// Takes any writer so callers can target stdout, a file or a buffer.
pub trait ReportPort {
    fn write(
        &self,
        analysis: &VolatilityAnalysis,
        config: &AnalysisConfig,
        out: &mut dyn Write,
    ) -> Result<(), VolstatsError>;
}
