//! Schema command implementation.
//!
//! The `shapecheck schema` command prints the JSON Schema for requirement
//! set files, for editor validation and autocompletion.

use crate::error::Result;
use crate::requirements::RequirementSetDocument;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }

    /// Render the schema as pretty JSON.
    pub fn render() -> Result<String> {
        let schema = schemars::schema_for!(RequirementSetDocument);
        serde_json::to_string_pretty(&schema).map_err(|e| anyhow::Error::from(e).into())
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.report(&format!("{}\n", Self::render()?));
        Ok(CommandResult::success())
    }
}
