//! Check command implementation.
//!
//! The `shapecheck check` command runs one analysis and reports the verdict.
//! Exit codes: 0 when every requirement is met, 1 when not, 2 when the
//! requirement set or source could not be processed.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::analysis::{AnalysisInput, AnalysisReport, Analyzer};
use crate::cli::args::CheckArgs;
use crate::config::ShapecheckConfig;
use crate::error::Result;
use crate::output::{render, HumanFormatter, ReportFormat};
use crate::requirements::{read_requirements_file, RequirementFormat};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::options::{read_source, RunOptions};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
    config: ShapecheckConfig,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs, config: ShapecheckConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            config,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Resolve options against the loaded settings.
    pub fn options(&self) -> Result<RunOptions> {
        RunOptions::resolve(&self.args, &self.config.settings, &self.project_root)
    }
}

/// Read both inputs and run one analysis.
pub(crate) fn analyze_files(opts: &RunOptions, record_paths: bool) -> Result<AnalysisReport> {
    let requirements = read_requirements_file(&opts.requirements)?;
    let source = read_source(&opts.source)?;
    debug!(
        "Checking {} against {} ({}, {} paths)",
        opts.source.display(),
        opts.requirements.display(),
        opts.language,
        opts.path_mode
    );

    let input = AnalysisInput::new(&requirements, &source)
        .with_format(RequirementFormat::from_path(&opts.requirements));
    let parser = opts.language.adapter();

    Ok(Analyzer::new(opts.projector(record_paths)).run(&input, parser.as_ref()))
}

/// Render a report through the UI.
pub(crate) fn show_report(
    report: &AnalysisReport,
    opts: &RunOptions,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let show_paths = opts.show_paths || ui.output_mode().shows_paths();
    let formatter = HumanFormatter::new(ui.use_color() && opts.format == ReportFormat::Human)
        .with_paths(show_paths)
        .with_tree(opts.show_tree);

    let text = render(report, opts.format, &formatter)?;
    ui.report(&text);
    Ok(())
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let opts = self.options()?;
        let record_paths = opts.show_paths || ui.output_mode().shows_paths();

        let report = analyze_files(&opts, record_paths)?;
        show_report(&report, &opts, ui)?;

        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapecheckError;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    const LOOP_REQS: &str =
        r#"{"required": [{"pattern": "ForStatement", "description": "Use a for loop"}]}"#;

    fn fixture(source: &str, requirements: &str) -> (TempDir, CheckArgs) {
        let temp = TempDir::new().unwrap();
        let source_path = temp.path().join("main.js");
        let reqs_path = temp.path().join("reqs.json");
        fs::write(&source_path, source).unwrap();
        fs::write(&reqs_path, requirements).unwrap();

        let args = CheckArgs {
            source: source_path,
            requirements: Some(reqs_path),
            ..Default::default()
        };
        (temp, args)
    }

    fn run(args: CheckArgs, root: &Path, ui: &mut MockUI) -> Result<CommandResult> {
        CheckCommand::new(root, args, ShapecheckConfig::default()).execute(ui)
    }

    #[test]
    fn matching_source_exits_zero() {
        let (temp, args) = fixture("for (;;) {}", LOOP_REQS);
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui).unwrap();

        assert!(result.success);
        assert_eq!(
            ui.report_text(),
            "In your code you should:\n[x] Use a for loop\nMatch: true\n"
        );
    }

    #[test]
    fn unmatched_source_exits_one() {
        let (temp, args) = fixture("var x = 1;", LOOP_REQS);
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.report_text().contains("[ ] Use a for loop"));
    }

    #[test]
    fn parse_error_exits_two() {
        let (temp, args) = fixture("}var x=0;", LOOP_REQS);
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.report_text().starts_with("Code Parse Error: "));
    }

    #[test]
    fn bad_requirements_exit_two() {
        let (temp, args) = fixture("for (;;) {}", r#"{"required": ["bad"]}"#);
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui
            .report_text()
            .starts_with("Required Elements Definition Error: "));
    }

    #[test]
    fn json_format() {
        let (temp, mut args) = fixture("for (;;) {}", LOOP_REQS);
        args.format = Some("json".into());
        args.show_paths = true;
        let mut ui = MockUI::new();

        run(args, temp.path(), &mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.report_text()).unwrap();
        assert_eq!(json["match"], true);
        assert_eq!(json["paths"][1], "/Program/ForStatement");
    }

    #[test]
    fn verbose_mode_shows_paths() {
        let (temp, args) = fixture("for (;;) {}", LOOP_REQS);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        run(args, temp.path(), &mut ui).unwrap();

        assert!(ui.report_text().starts_with("Paths:\n/Program\n"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let (temp, mut args) = fixture("", LOOP_REQS);
        args.source = temp.path().join("missing.js");
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui);
        assert!(matches!(result, Err(ShapecheckError::SourceNotFound { .. })));
    }

    #[test]
    fn missing_requirements_is_an_error() {
        let (temp, mut args) = fixture("x;", LOOP_REQS);
        args.requirements = Some(temp.path().join("missing.json"));
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui);
        assert!(matches!(
            result,
            Err(ShapecheckError::RequirementSetNotFound { .. })
        ));
    }

    #[test]
    fn yaml_requirements_by_extension() {
        let (temp, mut args) = fixture("while (x) {}", "");
        let reqs = temp.path().join("reqs.yml");
        fs::write(
            &reqs,
            "required:\n  - pattern: WhileStatement\n    description: Use a while loop\n",
        )
        .unwrap();
        args.requirements = Some(reqs);
        let mut ui = MockUI::new();

        let result = run(args, temp.path(), &mut ui).unwrap();
        assert!(result.success);
    }
}
