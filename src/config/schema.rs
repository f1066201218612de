//! Settings schema for `.shapecheck/config.yml`.
//!
//! ```yaml
//! settings:
//!   path_mode: cumulative
//!   max_nodes: 100000
//!   language: javascript
//!   default_format: human
//!   show_paths: false
//!   requirements: exercises/loops.json
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::PathMode;
use crate::output::ReportFormat;
use crate::parse::Language;

/// Root settings file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapecheckConfig {
    /// Analysis and output settings
    pub settings: Settings,
}

/// Settings that apply to every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How emitted paths are accumulated
    pub path_mode: PathMode,

    /// Abort traversal after this many nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<usize>,

    /// Source language; inferred from the file extension when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Report format used when `--format` is not given
    pub default_format: ReportFormat,

    /// Print emitted paths with human reports
    #[serde(skip_serializing_if = "is_false")]
    pub show_paths: bool,

    /// Requirement set used when `--requirements` is not given,
    /// relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<PathBuf>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Settings {
    /// Known keys under `settings:`.
    pub const KEYS: &'static [&'static str] = &[
        "path_mode",
        "max_nodes",
        "language",
        "default_format",
        "show_paths",
        "requirements",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ShapecheckConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ShapecheckConfig::default());
        assert_eq!(config.settings.path_mode, PathMode::Cumulative);
        assert_eq!(config.settings.default_format, ReportFormat::Human);
        assert!(config.settings.max_nodes.is_none());
    }

    #[test]
    fn parses_all_settings() {
        let yaml = r#"
settings:
  path_mode: scoped
  max_nodes: 500
  language: estree-json
  default_format: json
  show_paths: true
  requirements: reqs/loops.yml
"#;
        let config: ShapecheckConfig = serde_yaml::from_str(yaml).unwrap();
        let s = config.settings;
        assert_eq!(s.path_mode, PathMode::Scoped);
        assert_eq!(s.max_nodes, Some(500));
        assert_eq!(s.language, Some(Language::EstreeJson));
        assert_eq!(s.default_format, ReportFormat::Json);
        assert!(s.show_paths);
        assert_eq!(s.requirements, Some(PathBuf::from("reqs/loops.yml")));
    }

    #[test]
    fn rejects_unknown_path_mode() {
        let result: Result<ShapecheckConfig, _> =
            serde_yaml::from_str("settings:\n  path_mode: sideways\n");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_without_defaults() {
        let yaml = serde_yaml::to_string(&ShapecheckConfig::default()).unwrap();
        assert!(!yaml.contains("max_nodes"));
        assert!(!yaml.contains("show_paths"));
        assert!(yaml.contains("path_mode: cumulative"));
    }
}
