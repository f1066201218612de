//! Parse adapters that turn source text into a [`TreeNode`].
//!
//! The analyzer never parses source itself. It goes through the
//! [`ParseAdapter`] trait, which has two implementations:
//!
//! - [`JavaScriptParser`] - JavaScript source via tree-sitter, labelled with
//!   ESTree node names
//! - [`EstreeJsonParser`] - an already-parsed ESTree JSON document
//!
//! # Example
//!
//! ```
//! use shapecheck::parse::{JavaScriptParser, ParseAdapter};
//!
//! let tree = JavaScriptParser::new().parse("for (;;) {}").unwrap();
//! assert_eq!(tree.kind(), Some("Program"));
//!
//! assert!(JavaScriptParser::new().parse("}var x=0;").is_err());
//! ```

pub mod estree;
pub mod javascript;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ShapecheckError;
use crate::tree::TreeNode;

pub use estree::EstreeJsonParser;
pub use javascript::JavaScriptParser;

/// Converts source text into a tree.
pub trait ParseAdapter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Parse `source` into a tree, or report a syntax error.
    fn parse(&self, source: &str) -> Result<TreeNode, SourceParseError>;
}

/// Source text failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SourceParseError {
    /// Parser message, e.g. `Line 1: Unexpected token }`.
    pub message: String,
    /// 1-indexed line of the error, when known.
    pub line: Option<usize>,
    /// 1-indexed column of the error, when known.
    pub column: Option<usize>,
}

impl SourceParseError {
    /// Create an error without location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a 1-indexed location.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    /// JavaScript source text.
    #[default]
    Javascript,
    /// ESTree JSON produced by an external parser.
    EstreeJson,
}

impl Language {
    /// Infer the language from a file extension: `.json` is ESTree JSON,
    /// anything else is JavaScript.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::EstreeJson,
            _ => Self::Javascript,
        }
    }

    /// Build the parse adapter for this language.
    pub fn adapter(self) -> Box<dyn ParseAdapter> {
        match self {
            Self::Javascript => Box::new(JavaScriptParser::new()),
            Self::EstreeJson => Box::new(EstreeJsonParser::new()),
        }
    }
}

impl FromStr for Language {
    type Err = ShapecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::Javascript),
            "estree-json" | "estree" | "json" => Ok(Self::EstreeJson),
            _ => Err(ShapecheckError::UnknownLanguage {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Javascript => write!(f, "javascript"),
            Self::EstreeJson => write!(f, "estree-json"),
        }
    }
}
