//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Source path meaning standard input.
pub const STDIN_SOURCE: &str = "-";

/// Shapecheck - check source code for required structural patterns.
#[derive(Debug, Parser)]
#[command(name = "shapecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides .shapecheck/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a source file against a requirement set
    Check(CheckArgs),

    /// Print the type-label paths emitted for a source file
    Paths(PathsArgs),

    /// Print the parsed tree as JSON
    Tree(TreeArgs),

    /// Re-check whenever the source or requirement file changes
    Watch(WatchArgs),

    /// Print the JSON Schema for requirement-set files
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Source file to check (`-` reads standard input)
    pub source: PathBuf,

    /// Requirement-set file (.json, .yml or .yaml)
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,

    /// Source language: javascript, estree-json
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path accumulation: cumulative, scoped
    #[arg(long)]
    pub path_mode: Option<String>,

    /// Abort after visiting this many nodes
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Output format: human, json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Print emitted paths
    #[arg(long)]
    pub show_paths: bool,

    /// Print the parsed tree
    #[arg(long)]
    pub show_tree: bool,
}

/// Arguments for the `paths` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PathsArgs {
    /// Source file (`-` reads standard input)
    pub source: PathBuf,

    /// Source language: javascript, estree-json
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path accumulation: cumulative, scoped
    #[arg(long)]
    pub path_mode: Option<String>,

    /// Abort after visiting this many nodes
    #[arg(long)]
    pub max_nodes: Option<usize>,
}

/// Arguments for the `tree` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TreeArgs {
    /// Source file (`-` reads standard input)
    pub source: PathBuf,

    /// Source language: javascript, estree-json
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub check: CheckArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
