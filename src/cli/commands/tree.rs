//! Tree command implementation.
//!
//! The `shapecheck tree` command prints the parsed tree as pretty JSON.

use crate::cli::args::TreeArgs;
use crate::config::ShapecheckConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::options::{read_source, resolve_language};

/// The tree command implementation.
pub struct TreeCommand {
    args: TreeArgs,
    config: ShapecheckConfig,
}

impl TreeCommand {
    /// Create a new tree command.
    pub fn new(args: TreeArgs, config: ShapecheckConfig) -> Self {
        Self { args, config }
    }
}

impl Command for TreeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let language = resolve_language(
            self.args.language.as_deref(),
            &self.config.settings,
            &self.args.source,
        )?;
        let source = read_source(&self.args.source)?;

        let tree = language.adapter().parse(&source)?;
        ui.report(&format!("{}\n", tree.to_pretty_json()));
        Ok(CommandResult::success())
    }
}
