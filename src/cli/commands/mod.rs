//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads settings
//! once and routes CLI subcommands to their implementations. Flag and
//! settings resolution shared by `check` and `watch` lives in [`options`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod options;
pub mod paths;
pub mod schema;
pub mod tree;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use options::RunOptions;
