//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! output for later assertion. Mode filtering matches [`TerminalUI`].
//!
//! [`TerminalUI`]: super::TerminalUI

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    reports: Vec<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured reports.
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// All captured reports joined into one string.
    pub fn report_text(&self) -> String {
        self.reports.concat()
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check if any error was captured containing `text`.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|e| e.contains(text))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn use_color(&self) -> bool {
        false
    }

    fn report(&mut self, text: &str) {
        if self.mode.shows_reports() {
            self.reports.push(text.to_string());
        }
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.messages.push(msg.to_string());
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.warnings.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            self.headers.push(title.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Paths");

        assert_eq!(ui.messages(), ["hello"]);
        assert_eq!(ui.successes(), ["done"]);
        assert_eq!(ui.warnings(), ["careful"]);
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), ["Paths"]);
    }

    #[test]
    fn silent_mode_keeps_only_errors() {
        let mut ui = MockUI::with_mode(OutputMode::Silent);
        ui.report("Match: true\n");
        ui.message("status");
        ui.error("broken");

        assert!(ui.reports().is_empty());
        assert!(ui.messages().is_empty());
        assert_eq!(ui.errors().len(), 1);
    }

    #[test]
    fn report_text_concatenates() {
        let mut ui = MockUI::new();
        ui.report("a\n");
        ui.report("b\n");
        assert_eq!(ui.report_text(), "a\nb\n");
    }
}
