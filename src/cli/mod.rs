//! Command-line interface for shapecheck.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, PathsArgs, TreeArgs, WatchArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, RunOptions};
