//! Report formatters.
//!
//! Renders an [`AnalysisReport`] as a human-readable checklist or as a
//! single JSON object for tooling.

pub mod human;
pub mod json;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisReport;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {} (expected human or json)", s)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting analysis reports.
pub trait ReportFormatter {
    /// Format `report` to the given writer.
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()>;
}

/// Render `report` in `format` into a string.
pub fn render(
    report: &AnalysisReport,
    format: ReportFormat,
    human: &HumanFormatter,
) -> std::io::Result<String> {
    let mut buf = Vec::new();
    match format {
        ReportFormat::Human => human.format(report, &mut buf)?,
        ReportFormat::Json => JsonFormatter::new()
            .with_paths(human.show_paths)
            .format(report, &mut buf)?,
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
