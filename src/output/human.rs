//! Human-readable report formatter.
//!
//! ```text
//! In your code you should:
//! [x] Use a for loop
//! [ ] Avoid while loops
//! Match: false
//! ```

use std::io::Write;

use super::ReportFormatter;
use crate::analysis::AnalysisReport;
use crate::ui::ShapecheckTheme;

/// Heading above the requirement checklist.
pub const CHECKLIST_HEADING: &str = "In your code you should:";

/// Formats reports for terminal display.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
    /// Print the emitted paths before the checklist.
    pub show_paths: bool,
    /// Print the parsed tree before the checklist.
    pub show_tree: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            show_paths: false,
            show_tree: false,
        }
    }

    /// Also print emitted paths.
    pub fn with_paths(mut self, show: bool) -> Self {
        self.show_paths = show;
        self
    }

    /// Also print the parsed tree.
    pub fn with_tree(mut self, show: bool) -> Self {
        self.show_tree = show;
        self
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()> {
        let theme = ShapecheckTheme::for_color(self.use_color);

        if self.show_tree {
            if let Some(tree) = report.tree_json() {
                writeln!(writer, "{}", theme.format_header("Tree:"))?;
                writeln!(writer, "{}", tree)?;
                writeln!(writer)?;
            }
        }

        if self.show_paths && !report.paths.is_empty() {
            writeln!(writer, "{}", theme.format_header("Paths:"))?;
            writeln!(writer, "{}", theme.dim.apply_to(report.paths_text()))?;
            writeln!(writer)?;
        }

        if let Some(diagnostic) = &report.diagnostic {
            writeln!(writer, "{}", theme.error.apply_to(diagnostic))?;
        } else {
            writeln!(writer, "{}", CHECKLIST_HEADING)?;
            for status in &report.verdict.per_requirement {
                let style = if status.displayed_ok {
                    &theme.success
                } else {
                    &theme.error
                };
                writeln!(
                    writer,
                    "{} {}",
                    style.apply_to(status.marker()),
                    status.description
                )?;
            }
        }

        let verdict = format!("Match: {}", report.verdict.overall_match);
        if report.verdict.overall_match {
            writeln!(writer, "{}", theme.success.apply_to(verdict))?;
        } else {
            writeln!(writer, "{}", theme.highlight.apply_to(verdict))?;
        }

        Ok(())
    }
}
