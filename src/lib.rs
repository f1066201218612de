//! Shapecheck - check source code for required structural patterns.
//!
//! Shapecheck parses a program, walks its syntax tree emitting a path of
//! node type labels for every node, and tests each path against a set of
//! requirements (`ForStatement`, `IfStatement/BlockStatement`, ...). A
//! requirement may also demand that a pattern never appears.
//!
//! # Modules
//!
//! - [`analysis`] - Path projection, requirement matching, verdicts and runs
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`output`] - Human and JSON report formatters
//! - [`parse`] - Parse adapters producing syntax trees
//! - [`requirements`] - Requirement sets and their loader
//! - [`tree`] - The syntax tree model
//! - [`ui`] - Terminal output
//! - [`watch`] - File watching for re-runs
//!
//! # Example
//!
//! ```
//! use shapecheck::analysis::analyze;
//!
//! let requirements = r#"{"required": [
//!     {"pattern": "ForStatement", "description": "Use a for loop"},
//!     {"pattern": "WhileStatement", "description": "Avoid while loops", "exclude": true}
//! ]}"#;
//!
//! let report = analyze(requirements, "for (var i = 0; i < 3; i++) { total += i; }");
//! assert!(report.is_match());
//!
//! let report = analyze(requirements, "while (busy) { poll(); }");
//! assert!(!report.is_match());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parse;
pub mod requirements;
pub mod tree;
pub mod ui;
pub mod watch;

pub use analysis::{analyze, AnalysisReport, Analyzer, PathMode, Verdict};
pub use error::{Result, ShapecheckError};
