//! Tree traversal, requirement matching and verdicts.
//!
//! # Modules
//!
//! - [`projector`] - Depth-first walk emitting type-label paths
//! - [`matcher`] - Substring matching of paths against requirements
//! - [`verdict`] - Per-requirement status and overall match
//! - [`run`] - One analysis run and its state machine
//! - [`trigger`] - Coalescing of watch-mode re-runs
//!
//! # Example
//!
//! ```
//! use shapecheck::analysis::analyze;
//!
//! let report = analyze(
//!     r#"{"required": [{"pattern": "ForStatement", "description": "use a loop"}]}"#,
//!     "for (;;) {}",
//! );
//! assert!(report.is_match());
//! assert_eq!(report.exit_code(), 0);
//! ```

pub mod matcher;
pub mod projector;
pub mod run;
pub mod trigger;
pub mod verdict;

pub use matcher::RequirementMatcher;
pub use projector::{
    Discard, PathMode, PathProjector, PathSink, Projection, TraversalEvent,
    TraversalLimitExceeded,
};
pub use run::{
    AnalysisInput, AnalysisReport, Analyzer, RunContext, RunState, LIMIT_ERROR_PREFIX,
    LOAD_ERROR_PREFIX, PARSE_ERROR_PREFIX,
};
pub use trigger::TriggerQueue;
pub use verdict::{RequirementStatus, Verdict};

use crate::parse::JavaScriptParser;

/// Check JavaScript `source` against a JSON requirement set with default
/// settings.
pub fn analyze(requirements: &str, source: &str) -> AnalysisReport {
    Analyzer::default().run(
        &AnalysisInput::new(requirements, source),
        &JavaScriptParser::new(),
    )
}
