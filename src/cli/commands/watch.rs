//! Watch command implementation.
//!
//! The `shapecheck watch` command runs `check` once, then again whenever
//! the source or requirement-set file changes. Each run starts from a
//! freshly loaded requirement set.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::args::WatchArgs;
use crate::config::ShapecheckConfig;
use crate::error::{Result, ShapecheckError};
use crate::ui::UserInterface;
use crate::watch::{drive, FileWatcher};

use super::check::{analyze_files, show_report};
use super::dispatcher::{Command, CommandResult};
use super::options::RunOptions;

/// The watch command implementation.
pub struct WatchCommand {
    project_root: PathBuf,
    args: WatchArgs,
    config: ShapecheckConfig,
}

impl WatchCommand {
    /// Create a new watch command.
    pub fn new(project_root: &Path, args: WatchArgs, config: ShapecheckConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            config,
        }
    }

    /// Resolve options; standard input cannot be watched.
    pub fn options(&self) -> Result<RunOptions> {
        let opts = RunOptions::resolve(&self.args.check, &self.config.settings, &self.project_root)?;
        if opts.reads_stdin() {
            return Err(ShapecheckError::WatchFailed {
                message: "cannot watch standard input".to_string(),
            });
        }
        Ok(opts)
    }
}

/// One run inside the watch loop. Errors are shown, never fatal.
fn run_once(opts: &RunOptions, ui: &mut dyn UserInterface) {
    let record_paths = opts.show_paths || ui.output_mode().shows_paths();
    let outcome = match analyze_files(opts, record_paths) {
        Ok(report) => show_report(&report, opts, &mut *ui),
        Err(e) => Err(e),
    };
    if let Err(e) = outcome {
        warn!("Watch run failed: {}", e);
        ui.error(&e.to_string());
    }
}

impl Command for WatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let opts = self.options()?;
        let watcher = FileWatcher::new(&[opts.source.clone(), opts.requirements.clone()])?;

        run_once(&opts, ui);
        ui.success(&format!(
            "Watching {} and {} for changes",
            opts.source.display(),
            opts.requirements.display()
        ));

        drive(watcher.events(), || {
            ui.show_header("Change detected");
            run_once(&opts, &mut *ui);
        });

        Ok(CommandResult::success())
    }
}
