//! Output reporters for analysis results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - The serialized result contract

mod json;
mod text;

use crate::models::AnalysisResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a result using an OutputFormat enum
pub fn report_with_format(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result),
        OutputFormat::Json => json::render(result),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::SourceType;
    use crate::pipeline::{FixedClock, RuleBasedModel, SequentialRunIds};
    use chrono::{TimeZone, Utc};

    /// Deterministic result with a liability finding
    pub(crate) fn test_result() -> AnalysisResult {
        RuleBasedModel::new()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap()))
            .with_run_ids(SequentialRunIds::new())
            .run(
                "Vendor accepts unlimited liability for all losses.",
                "Sample MSA",
                SourceType::Paste,
            )
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("sarif").is_err());
    }

    #[test]
    fn test_report_dispatch() {
        let result = test_result();
        assert!(report_with_format(&result, OutputFormat::Json)
            .unwrap()
            .starts_with('{'));
        assert!(report_with_format(&result, OutputFormat::Text)
            .unwrap()
            .contains("FINDINGS"));
    }
}
