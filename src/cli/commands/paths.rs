//! Paths command implementation.
//!
//! The `shapecheck paths` command prints the emitted path sequence, one
//! path per line, without matching anything.

use crate::analysis::PathProjector;
use crate::cli::args::PathsArgs;
use crate::config::ShapecheckConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::options::{read_source, resolve_language, resolve_path_mode};

/// The paths command implementation.
pub struct PathsCommand {
    args: PathsArgs,
    config: ShapecheckConfig,
}

impl PathsCommand {
    /// Create a new paths command.
    pub fn new(args: PathsArgs, config: ShapecheckConfig) -> Self {
        Self { args, config }
    }
}

impl Command for PathsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = &self.config.settings;
        let language = resolve_language(self.args.language.as_deref(), settings, &self.args.source)?;
        let mode = resolve_path_mode(self.args.path_mode.as_deref(), settings)?;
        let source = read_source(&self.args.source)?;

        let tree = language.adapter().parse(&source)?;

        let projector =
            PathProjector::new(mode).with_max_nodes(self.args.max_nodes.or(settings.max_nodes));
        let paths = projector.paths(&tree)?;

        let mut text = paths.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        ui.report(&text);
        Ok(CommandResult::success())
    }
}
