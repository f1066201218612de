//! Settings loading, merging, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use shapecheck::analysis::PathMode;
//! use shapecheck::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".shapecheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  path_mode: scoped\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.settings.path_mode, PathMode::Scoped);
//! ```
//!
//! # File Locations
//!
//! Settings are merged in this order:
//! 1. Project config (`.shapecheck/config.yml`)
//! 2. Local overrides (`.shapecheck/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{Settings, ShapecheckConfig};
pub use validator::{validate, validate_config, validate_keys, ValidationError};
