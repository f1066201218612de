//! Resolution of command flags against settings.
//!
//! CLI flags win over settings; settings win over built-in defaults.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::analysis::{PathMode, PathProjector};
use crate::cli::args::{CheckArgs, STDIN_SOURCE};
use crate::config::Settings;
use crate::error::{Result, ShapecheckError};
use crate::output::ReportFormat;
use crate::parse::Language;

/// Fully resolved options for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Source file, or `-` for standard input
    pub source: PathBuf,
    /// Requirement-set file
    pub requirements: PathBuf,
    /// Source language
    pub language: Language,
    /// Path accumulation mode
    pub path_mode: PathMode,
    /// Node limit
    pub max_nodes: Option<usize>,
    /// Report format
    pub format: ReportFormat,
    /// Print emitted paths
    pub show_paths: bool,
    /// Print the parsed tree
    pub show_tree: bool,
}

impl RunOptions {
    /// Resolve `check`/`watch` flags against settings.
    pub fn resolve(args: &CheckArgs, settings: &Settings, project_root: &Path) -> Result<Self> {
        let requirements = match (&args.requirements, &settings.requirements) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => project_root.join(path),
            (None, None) => {
                return Err(ShapecheckError::ConfigValidationError {
                    message: "no requirement set given; pass --requirements or set settings.requirements"
                        .to_string(),
                })
            }
        };

        let format = match &args.format {
            Some(name) => name
                .parse()
                .map_err(|message| ShapecheckError::ConfigValidationError { message })?,
            None => settings.default_format,
        };

        Ok(Self {
            language: resolve_language(args.language.as_deref(), settings, &args.source)?,
            path_mode: resolve_path_mode(args.path_mode.as_deref(), settings)?,
            max_nodes: args.max_nodes.or(settings.max_nodes),
            source: args.source.clone(),
            requirements,
            format,
            show_paths: args.show_paths || settings.show_paths,
            show_tree: args.show_tree,
        })
    }

    /// Projector configured for these options.
    pub fn projector(&self, record_paths: bool) -> PathProjector {
        PathProjector::new(self.path_mode)
            .with_max_nodes(self.max_nodes)
            .with_record_paths(record_paths)
    }

    /// Whether the source is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        is_stdin(&self.source)
    }
}

/// Resolve the source language: flag, then settings, then file extension.
pub fn resolve_language(flag: Option<&str>, settings: &Settings, source: &Path) -> Result<Language> {
    if let Some(name) = flag {
        return name.parse();
    }
    if let Some(language) = settings.language {
        return Ok(language);
    }
    if is_stdin(source) {
        return Ok(Language::default());
    }
    Ok(Language::from_path(source))
}

/// Resolve the path mode: flag, then settings.
pub fn resolve_path_mode(flag: Option<&str>, settings: &Settings) -> Result<PathMode> {
    match flag {
        Some(name) => name
            .parse()
            .map_err(|message| ShapecheckError::ConfigValidationError { message }),
        None => Ok(settings.path_mode),
    }
}

/// Whether `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_SOURCE
}

/// Read source text from a file or standard input.
pub fn read_source(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShapecheckError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShapecheckError::Io(e)
        }
    })
}
