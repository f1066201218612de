//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::config::merger::merge_configs;
use crate::config::schema::ShapecheckConfig;
use crate::config::validator::{into_result, validate, validate_keys};
use crate::error::{Result, ShapecheckError};

/// Directory holding settings files.
pub const CONFIG_DIR: &str = ".shapecheck";

/// Paths to settings files in merge order (later overrides earlier).
///
/// 1. Project config (`.shapecheck/config.yml`)
/// 2. Local overrides (`.shapecheck/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .shapecheck/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .shapecheck/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover settings files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if a project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// A `.shapecheck` directory marks the root; `.git` is the fallback.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single settings file, without merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist,
/// `ConfigParseError` if the YAML is invalid and
/// `ConfigValidationError` if it holds unknown keys or bad values.
pub fn load_config_file(path: &Path) -> Result<ShapecheckConfig> {
    let value = load_config_value(path)?;
    from_value(value, path)
}

/// Parse YAML content into a validated [`ShapecheckConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ShapecheckConfig> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| ShapecheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })?;
    from_value(value, source_path)
}

/// Load a settings file as raw YAML for merging.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShapecheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShapecheckError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| ShapecheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project settings and local overrides.
///
/// A project without settings files gets the defaults.
pub fn load_merged_config(project_root: &Path) -> Result<ShapecheckConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() && paths.project_local.is_none() {
        debug!("No settings found under {}", project_root.display());
        return Ok(ShapecheckConfig::default());
    }

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        debug!("Loading settings from {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);
    from_value(merged, &project_root.join(CONFIG_DIR).join("config.yml"))
}

/// Load settings with an optional path override.
///
/// With `config_override` only that file is loaded; otherwise the project
/// layers are discovered and merged.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ShapecheckConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

fn from_value(value: Value, source_path: &Path) -> Result<ShapecheckConfig> {
    into_result(validate_keys(&value))?;

    let config = if value.is_null() {
        ShapecheckConfig::default()
    } else {
        serde_yaml::from_value(value).map_err(|e| ShapecheckError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PathMode;
    use crate::output::ReportFormat;
    use tempfile::TempDir;

    fn project(config: &str, local: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        if let Some(local) = local {
            fs::write(dir.join("config.local.yml"), local).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = project("", Some(""));
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
        assert!(paths.all_existing()[0].ends_with("config.yml"));
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn find_project_root_prefers_config_dir_over_git() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("nested").join("project");
        fs::create_dir_all(subdir.join("src")).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(subdir.join(CONFIG_DIR)).unwrap();

        let root = find_project_root(&subdir.join("src"));
        assert_eq!(root, Some(subdir));
    }

    #[test]
    fn find_project_root_falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("src");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn missing_project_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, ShapecheckConfig::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let temp = project("", None);
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, ShapecheckConfig::default());
    }

    #[test]
    fn local_overrides_project() {
        let temp = project(
            "settings:\n  path_mode: scoped\n  max_nodes: 1000\n",
            Some("settings:\n  max_nodes: 50\n  default_format: json\n"),
        );

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.settings.path_mode, PathMode::Scoped);
        assert_eq!(config.settings.max_nodes, Some(50));
        assert_eq!(config.settings.default_format, ReportFormat::Json);
    }

    #[test]
    fn local_null_removes_project_value() {
        let temp = project("settings:\n  max_nodes: 1000\n", Some("settings:\n  max_nodes: ~\n"));
        let config = load_merged_config(temp.path()).unwrap();
        assert!(config.settings.max_nodes.is_none());
    }

    #[test]
    fn unknown_setting_is_rejected() {
        let temp = project("settings:\n  colour: always\n", None);
        let result = load_merged_config(temp.path());
        assert!(matches!(
            result,
            Err(ShapecheckError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let result = parse_config("settings: [", Path::new("test.yml"));
        assert!(matches!(result, Err(ShapecheckError::ConfigParseError { .. })));
    }

    #[test]
    fn wrong_value_type_is_parse_error() {
        let result = parse_config("settings:\n  max_nodes: lots\n", Path::new("test.yml"));
        assert!(matches!(result, Err(ShapecheckError::ConfigParseError { .. })));
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/config.yml"));
        assert!(matches!(result, Err(ShapecheckError::ConfigNotFound { .. })));
    }

    #[test]
    fn override_skips_merge() {
        let temp = project("settings:\n  path_mode: scoped\n", None);
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, "settings:\n  show_paths: true\n").unwrap();

        let config = load_config(temp.path(), Some(&custom)).unwrap();
        assert!(config.settings.show_paths);
        assert_eq!(config.settings.path_mode, PathMode::Cumulative);
    }
}
