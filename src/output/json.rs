//! JSON report formatter.

use serde::Serialize;
use std::io::Write;

use super::ReportFormatter;
use crate::analysis::{AnalysisReport, RequirementStatus, RunState};

/// Formats reports as a single JSON object.
#[derive(Debug, Default)]
pub struct JsonFormatter {
    include_paths: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(rename = "match")]
    matched: bool,
    state: RunState,
    requirements: &'a [RequirementStatus],
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<&'a [String]>,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the emitted paths in the output.
    pub fn with_paths(mut self, include: bool) -> Self {
        self.include_paths = include;
        self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            matched: report.verdict.overall_match,
            state: report.state,
            requirements: &report.verdict.per_requirement,
            error: report.diagnostic.as_deref(),
            paths: self.include_paths.then_some(report.paths.as_slice()),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
