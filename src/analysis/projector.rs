//! Path projection: turning a tree into a stream of structural paths.
//!
//! The projector walks every field of every node in its defined order. Each
//! type label it meets is appended to the running path as `/Label`, and the
//! resulting path is emitted to a [`PathSink`] before the walk continues.
//!
//! # Path modes
//!
//! With [`PathMode::Cumulative`] (the default) one accumulator is threaded
//! through the whole walk and never rewound, so every emitted path extends
//! the previous one:
//!
//! ```text
//! /Program
//! /Program/ForStatement
//! /Program/ForStatement/BlockStatement
//! /Program/ForStatement/BlockStatement/ExpressionStatement
//! ```
//!
//! A later sibling therefore sees the labels of everything visited before
//! it. Requirement sets written for this behavior rely on it, so it is kept
//! as is. [`PathMode::Scoped`] gives each subtree its own copy of the
//! parent's path instead, producing conventional parent chains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::tree::{FieldValue, Scalar, TreeNode};

/// How the path accumulator is shared across the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// One append-only accumulator for the entire walk.
    #[default]
    Cumulative,
    /// Each node works on its own copy of the path it was given.
    Scoped,
}

impl FromStr for PathMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cumulative" => Ok(Self::Cumulative),
            "scoped" => Ok(Self::Scoped),
            _ => Err(format!("unknown path mode: {}", s)),
        }
    }
}

impl fmt::Display for PathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative => write!(f, "cumulative"),
            Self::Scoped => write!(f, "scoped"),
        }
    }
}

/// Something the walk reports as it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent<'a> {
    /// A type label was appended; `path` is the path just emitted.
    TypeLabel { label: &'a str, path: &'a str },
}

/// Receives traversal events in emission order.
pub trait PathSink {
    /// Handle one event.
    fn on_event(&mut self, event: TraversalEvent<'_>);
}

/// Sink that ignores every event.
#[derive(Debug, Default)]
pub struct Discard;

impl PathSink for Discard {
    fn on_event(&mut self, _event: TraversalEvent<'_>) {}
}

/// The traversal guard fired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("traversal visited more than {limit} nodes")]
pub struct TraversalLimitExceeded {
    /// Configured node limit.
    pub limit: usize,
    /// Paths emitted before the walk stopped.
    pub paths: Vec<String>,
}

/// Result of a complete walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Emitted paths, in order. Empty when recording is disabled.
    pub paths: Vec<String>,
    /// Nodes visited.
    pub nodes_visited: usize,
    /// Paths emitted, whether recorded or not.
    pub emitted: usize,
}

/// Walks a tree and emits structural paths.
#[derive(Debug, Clone)]
pub struct PathProjector {
    mode: PathMode,
    max_nodes: Option<usize>,
    record_paths: bool,
}

impl Default for PathProjector {
    fn default() -> Self {
        Self::new(PathMode::default())
    }
}

impl PathProjector {
    /// Create a projector with no node limit that records every path.
    pub fn new(mode: PathMode) -> Self {
        Self {
            mode,
            max_nodes: None,
            record_paths: true,
        }
    }

    /// Stop the walk once more than `limit` nodes have been visited.
    pub fn with_max_nodes(mut self, limit: Option<usize>) -> Self {
        self.max_nodes = limit;
        self
    }

    /// Whether to keep the emitted paths. Cumulative paths grow with every
    /// label, so large inputs may want matching without the record.
    pub fn with_record_paths(mut self, record: bool) -> Self {
        self.record_paths = record;
        self
    }

    /// The configured path mode.
    pub fn mode(&self) -> PathMode {
        self.mode
    }

    /// The configured node limit.
    pub fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Walk `root`, sending every event to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalLimitExceeded`] when the node limit is hit. Events
    /// already delivered to `sink` stay delivered.
    pub fn project<S: PathSink + ?Sized>(
        &self,
        root: &TreeNode,
        sink: &mut S,
    ) -> Result<Projection, TraversalLimitExceeded> {
        let mut walk = Walk {
            projector: self,
            sink,
            visited: 0,
            emitted: 0,
            paths: Vec::new(),
        };
        let mut path = String::new();

        match walk.node(root, &mut path) {
            Ok(()) => Ok(Projection {
                paths: walk.paths,
                nodes_visited: walk.visited,
                emitted: walk.emitted,
            }),
            Err(limit) => Err(TraversalLimitExceeded {
                limit,
                paths: walk.paths,
            }),
        }
    }

    /// Walk `root` and return only the emitted paths.
    pub fn paths(&self, root: &TreeNode) -> Result<Vec<String>, TraversalLimitExceeded> {
        self.project(root, &mut Discard).map(|p| p.paths)
    }
}

struct Walk<'p, S: PathSink + ?Sized> {
    projector: &'p PathProjector,
    sink: &'p mut S,
    visited: usize,
    emitted: usize,
    paths: Vec<String>,
}

impl<S: PathSink + ?Sized> Walk<'_, S> {
    /// Err carries the limit that was exceeded.
    fn node(&mut self, node: &TreeNode, path: &mut String) -> Result<(), usize> {
        self.visited += 1;
        if let Some(limit) = self.projector.max_nodes {
            if self.visited > limit {
                return Err(limit);
            }
        }

        match self.projector.mode {
            PathMode::Cumulative => self.fields(node, path),
            PathMode::Scoped => {
                let mut local = path.clone();
                self.fields(node, &mut local)
            }
        }
    }

    fn fields(&mut self, node: &TreeNode, path: &mut String) -> Result<(), usize> {
        for field in node.fields() {
            match &field.value {
                FieldValue::Node(child) => self.node(child, path)?,
                FieldValue::NodeSequence(children) => {
                    for child in children {
                        self.node(child, path)?;
                    }
                }
                FieldValue::Scalar(Scalar::TypeLabel(label)) => self.emit(label, path),
                FieldValue::Scalar(_) => {}
            }
        }
        Ok(())
    }

    fn emit(&mut self, label: &str, path: &mut String) {
        path.push('/');
        path.push_str(label);
        trace!(path = %path.as_str(), "path emitted");

        self.sink.on_event(TraversalEvent::TypeLabel {
            label,
            path: path.as_str(),
        });
        self.emitted += 1;
        if self.projector.record_paths {
            self.paths.push(path.clone());
        }
    }
}
