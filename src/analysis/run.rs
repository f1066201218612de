//! One analysis run, from requirement text to verdict.
//!
//! A [`RunContext`] is created for every run and owns that run's
//! requirement set, so no satisfaction state can leak between runs. The
//! [`Analyzer`] drives it through the run states:
//!
//! ```text
//! Idle -> LoadingRequirements -> LoadError
//!                             -> ParsingCode -> ParseError
//!                                            -> Traversing -> LimitExceeded
//!                                                          -> Done
//! ```
//!
//! Every failure state is terminal for the run and forces a failed verdict.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::matcher::RequirementMatcher;
use super::projector::{PathMode, PathProjector, Projection, TraversalLimitExceeded};
use super::verdict::Verdict;
use crate::error::ShapecheckError;
use crate::parse::{ParseAdapter, SourceParseError};
use crate::requirements::{parse_requirements, RequirementFormat, RequirementSet, RequirementSetError};
use crate::tree::TreeNode;

/// Prefix for requirement-set diagnostics.
pub const LOAD_ERROR_PREFIX: &str = "Required Elements Definition Error";
/// Prefix for source parse diagnostics.
pub const PARSE_ERROR_PREFIX: &str = "Code Parse Error";
/// Prefix for traversal guard diagnostics.
pub const LIMIT_ERROR_PREFIX: &str = "Traversal Limit Exceeded";

/// Where a run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    LoadingRequirements,
    LoadError,
    ParsingCode,
    ParseError,
    Traversing,
    LimitExceeded,
    Done,
}

impl RunState {
    /// Whether the run can advance no further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::LoadError | Self::ParseError | Self::LimitExceeded | Self::Done
        )
    }

    /// Whether the run stopped on an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::LoadError | Self::ParseError | Self::LimitExceeded)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::LoadingRequirements => "loading requirements",
            Self::LoadError => "load error",
            Self::ParsingCode => "parsing code",
            Self::ParseError => "parse error",
            Self::Traversing => "traversing",
            Self::LimitExceeded => "limit exceeded",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Inputs to one run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    /// Requirement-set document text.
    pub requirements: &'a str,
    /// Encoding of `requirements`.
    pub requirement_format: RequirementFormat,
    /// Source text handed unmodified to the parse adapter.
    pub source: &'a str,
}

impl<'a> AnalysisInput<'a> {
    /// JSON requirements against `source`.
    pub fn new(requirements: &'a str, source: &'a str) -> Self {
        Self {
            requirements,
            requirement_format: RequirementFormat::Json,
            source,
        }
    }

    /// Set the requirement encoding.
    pub fn with_format(mut self, format: RequirementFormat) -> Self {
        self.requirement_format = format;
        self
    }
}

/// Per-run state threaded through loading, parsing and traversal.
#[derive(Debug)]
pub struct RunContext {
    state: RunState,
    requirements: RequirementSet,
    diagnostic: Option<String>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    /// A fresh run in the `Idle` state with an empty set.
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
            requirements: RequirementSet::new(),
            diagnostic: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The run's requirement set.
    pub fn requirements(&self) -> &RequirementSet {
        &self.requirements
    }

    /// Diagnostic for a failed run.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Decode the requirement set. On failure the set stays empty and the
    /// run ends in `LoadError`.
    pub fn load_requirements(
        &mut self,
        text: &str,
        format: RequirementFormat,
    ) -> Result<(), RequirementSetError> {
        debug_assert_eq!(self.state, RunState::Idle);
        self.state = RunState::LoadingRequirements;

        match parse_requirements(text, format) {
            Ok(set) => {
                self.requirements = set;
                self.state = RunState::ParsingCode;
                Ok(())
            }
            Err(e) => {
                self.requirements = RequirementSet::new();
                self.fail(RunState::LoadError, e.clone().into());
                Err(e)
            }
        }
    }

    /// Parse the source. On failure the run ends in `ParseError`.
    pub fn parse_source(
        &mut self,
        source: &str,
        parser: &dyn ParseAdapter,
    ) -> Result<TreeNode, SourceParseError> {
        debug_assert_eq!(self.state, RunState::ParsingCode);
        debug!("Parsing source with {} adapter", parser.name());

        match parser.parse(source) {
            Ok(tree) => {
                self.state = RunState::Traversing;
                Ok(tree)
            }
            Err(e) => {
                self.fail(RunState::ParseError, e.clone().into());
                Err(e)
            }
        }
    }

    /// Walk the tree, matching each emitted path as it appears.
    pub fn traverse(
        &mut self,
        tree: &TreeNode,
        projector: &PathProjector,
    ) -> Result<Projection, TraversalLimitExceeded> {
        debug_assert_eq!(self.state, RunState::Traversing);

        let mut matcher = RequirementMatcher::new(&mut self.requirements);
        match projector.project(tree, &mut matcher) {
            Ok(projection) => {
                self.state = RunState::Done;
                Ok(projection)
            }
            Err(e) => {
                self.fail(RunState::LimitExceeded, e.clone().into());
                Err(e)
            }
        }
    }

    /// Aggregate the verdict for the current state.
    pub fn verdict(&self) -> Verdict {
        if self.state == RunState::Done {
            Verdict::aggregate(&self.requirements)
        } else {
            Verdict::failed()
        }
    }

    fn fail(&mut self, state: RunState, error: ShapecheckError) {
        let diagnostic = error.to_string();
        warn!("{}", diagnostic);
        self.state = state;
        self.diagnostic = Some(diagnostic);
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Final run state.
    pub state: RunState,
    /// Verdict; failed unless `state` is `Done`.
    pub verdict: Verdict,
    /// Emitted paths, in order.
    pub paths: Vec<String>,
    /// Parsed tree, when parsing succeeded.
    pub tree: Option<TreeNode>,
    /// Diagnostic for a failed run.
    pub diagnostic: Option<String>,
}

impl AnalysisReport {
    /// Whether every requirement is met.
    pub fn is_match(&self) -> bool {
        self.verdict.overall_match
    }

    /// Paths joined by newlines.
    pub fn paths_text(&self) -> String {
        self.paths.join("\n")
    }

    /// Parsed tree as pretty JSON.
    pub fn tree_json(&self) -> Option<String> {
        self.tree.as_ref().map(TreeNode::to_pretty_json)
    }

    /// Process exit code: 0 matched, 1 not matched, 2 run failed.
    pub fn exit_code(&self) -> i32 {
        match (self.state.is_failure(), self.verdict.overall_match) {
            (true, _) => 2,
            (false, true) => 0,
            (false, false) => 1,
        }
    }
}

/// Runs analyses with a fixed projector configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    projector: PathProjector,
}

impl Analyzer {
    /// Create an analyzer with the given projector.
    pub fn new(projector: PathProjector) -> Self {
        Self { projector }
    }

    /// Create an analyzer with the given path mode and no node limit.
    pub fn with_mode(mode: PathMode) -> Self {
        Self::new(PathProjector::new(mode))
    }

    /// The projector used for traversal.
    pub fn projector(&self) -> &PathProjector {
        &self.projector
    }

    /// Execute one complete run in a fresh [`RunContext`].
    pub fn run(&self, input: &AnalysisInput<'_>, parser: &dyn ParseAdapter) -> AnalysisReport {
        let mut ctx = RunContext::new();
        let mut tree = None;
        let mut paths = Vec::new();

        if ctx
            .load_requirements(input.requirements, input.requirement_format)
            .is_ok()
        {
            debug!("Loaded {} requirement(s)", ctx.requirements().len());
            if let Ok(parsed) = ctx.parse_source(input.source, parser) {
                match ctx.traverse(&parsed, &self.projector) {
                    Ok(projection) => {
                        debug!(
                            "Visited {} node(s), emitted {} path(s), {} requirement(s) satisfied",
                            projection.nodes_visited,
                            projection.emitted,
                            ctx.requirements().satisfied_count()
                        );
                        paths = projection.paths;
                    }
                    Err(e) => paths = e.paths,
                }
                tree = Some(parsed);
            }
        }

        debug_assert!(ctx.state().is_terminal());
        let verdict = ctx.verdict();
        info!(
            state = %ctx.state(),
            unmet = verdict.unmet().count(),
            "Match: {}",
            verdict.overall_match
        );

        AnalysisReport {
            state: ctx.state(),
            verdict,
            paths,
            tree,
            diagnostic: ctx.diagnostic().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{EstreeJsonParser, JavaScriptParser};

    const FOR_LOOP: &str = r#"{"required": [{"pattern": "ForStatement", "description": "use a loop"}]}"#;

    fn run(requirements: &str, source: &str) -> AnalysisReport {
        Analyzer::default().run(
            &AnalysisInput::new(requirements, source),
            &JavaScriptParser::new(),
        )
    }

    #[test]
    fn loop_present_matches() {
        let report = run(FOR_LOOP, "for (;;) {}");

        assert_eq!(report.state, RunState::Done);
        assert!(report.paths.iter().any(|p| p.ends_with("/ForStatement")));
        assert!(report.is_match());
        assert_eq!(report.exit_code(), 0);
        assert!(report.diagnostic.is_none());
    }

    #[test]
    fn loop_absent_does_not_match() {
        let report = run(FOR_LOOP, "var x = 1;");

        assert_eq!(report.state, RunState::Done);
        assert!(!report.paths.iter().any(|p| p.contains("ForStatement")));
        assert!(!report.is_match());
        assert_eq!(report.verdict.per_requirement[0].marker(), "[ ]");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn excluded_pattern_absent_matches() {
        let reqs = r#"{"required": [{"pattern": "WhileStatement", "exclude": true, "description": "avoid while loops"}]}"#;
        let report = run(reqs, "for (;;) {}");

        assert!(report.verdict.per_requirement[0].displayed_ok);
        assert!(report.is_match());
    }

    #[test]
    fn malformed_requirements_stop_before_parsing() {
        let report = run(r#"{"required": ["bad"]}"#, "for (;;) {}");

        assert_eq!(report.state, RunState::LoadError);
        assert!(!report.is_match());
        assert!(report.tree.is_none());
        assert!(report.paths.is_empty());
        let diagnostic = report.diagnostic.unwrap();
        assert!(diagnostic.starts_with(LOAD_ERROR_PREFIX));
        assert!(diagnostic.len() > LOAD_ERROR_PREFIX.len() + 2);
    }

    #[test]
    fn syntax_error_stops_before_matching() {
        let report = run(FOR_LOOP, "}var x=0;");

        assert_eq!(report.state, RunState::ParseError);
        assert!(!report.is_match());
        assert!(report.paths.is_empty());
        assert!(report.verdict.per_requirement.is_empty());
        assert!(report.diagnostic.as_ref().unwrap().starts_with(PARSE_ERROR_PREFIX));
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn empty_requirements_pass_vacuously() {
        let report = run(r#"{"required": []}"#, "var x = 1;");
        assert!(report.is_match());
    }

    #[test]
    fn node_limit_fails_the_run() {
        let analyzer = Analyzer::new(PathProjector::default().with_max_nodes(Some(2)));
        let report = analyzer.run(
            &AnalysisInput::new(FOR_LOOP, "for (;;) { x = 1; }"),
            &JavaScriptParser::new(),
        );

        assert_eq!(report.state, RunState::LimitExceeded);
        assert!(!report.is_match());
        assert_eq!(report.paths.len(), 2);
        assert!(report.tree.is_some());
        assert!(report.diagnostic.unwrap().starts_with(LIMIT_ERROR_PREFIX));
    }

    #[test]
    fn runs_do_not_share_state() {
        let analyzer = Analyzer::default();
        let parser = JavaScriptParser::new();

        let first = analyzer.run(&AnalysisInput::new(FOR_LOOP, "for (;;) {}"), &parser);
        let second = analyzer.run(&AnalysisInput::new(FOR_LOOP, "var x = 1;"), &parser);

        assert!(first.is_match());
        assert!(!second.is_match());
    }

    #[test]
    fn estree_input_is_analyzed() {
        let ast = r#"{"type": "Program", "body": [{"type": "ForStatement", "init": null, "test": null, "update": null, "body": {"type": "BlockStatement", "body": []}}]}"#;
        let report = Analyzer::default().run(
            &AnalysisInput::new(FOR_LOOP, ast),
            &EstreeJsonParser::new(),
        );
        assert_eq!(
            report.paths,
            [
                "/Program",
                "/Program/ForStatement",
                "/Program/ForStatement/BlockStatement"
            ]
        );
        assert!(report.is_match());
    }

    #[test]
    fn yaml_requirements() {
        let reqs = "required:\n  - pattern: VariableDeclaration\n    description: declare a variable\n";
        let report = Analyzer::default().run(
            &AnalysisInput::new(reqs, "let y = 2;").with_format(RequirementFormat::Yaml),
            &JavaScriptParser::new(),
        );
        assert!(report.is_match());
    }

    #[test]
    fn context_state_transitions() {
        let mut ctx = RunContext::new();
        assert_eq!(ctx.state(), RunState::Idle);

        ctx.load_requirements(FOR_LOOP, RequirementFormat::Json).unwrap();
        assert_eq!(ctx.state(), RunState::ParsingCode);

        let tree = ctx.parse_source("for (;;) {}", &JavaScriptParser::new()).unwrap();
        assert_eq!(ctx.state(), RunState::Traversing);
        assert!(!ctx.verdict().overall_match);

        ctx.traverse(&tree, &PathProjector::default()).unwrap();
        assert_eq!(ctx.state(), RunState::Done);
        assert!(ctx.state().is_terminal());
        assert!(ctx.verdict().overall_match);
    }

    #[test]
    fn load_error_clears_requirements() {
        let mut ctx = RunContext::new();
        assert!(ctx.load_requirements("not json", RequirementFormat::Json).is_err());
        assert_eq!(ctx.state(), RunState::LoadError);
        assert!(ctx.requirements().is_empty());
        assert!(ctx.state().is_failure());
    }

    #[test]
    fn scoped_mode_is_selectable() {
        let report = Analyzer::with_mode(PathMode::Scoped).run(
            &AnalysisInput::new(r#"{"required": []}"#, "a; b;"),
            &JavaScriptParser::new(),
        );
        assert!(report.paths.contains(&"/Program/ExpressionStatement".to_string()));
    }
}
