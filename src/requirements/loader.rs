//! Requirement set decoding.
//!
//! Decoding is all-or-nothing: malformed input yields a
//! [`RequirementSetError`] and no partial set, so a run can never proceed
//! with stale or half-loaded requirements.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use super::set::{Requirement, RequirementSet, RequirementSetDocument};
use crate::error::{Result, ShapecheckError};

/// A requirement-set document failed to decode or validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequirementSetError {
    /// Human-readable diagnostic.
    pub message: String,
}

impl RequirementSetError {
    /// Create a new error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Encoding of a requirement-set document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequirementFormat {
    /// JSON (canonical).
    #[default]
    Json,
    /// YAML with the same shape.
    Yaml,
}

impl RequirementFormat {
    /// Infer the format from a file extension: `.yml`/`.yaml` is YAML,
    /// anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl FromStr for RequirementFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("unknown requirement format: {}", s)),
        }
    }
}

/// Decode requirement-set text.
///
/// Missing `description` defaults to the pattern; missing `exclude` to
/// `false`. Every requirement starts unsatisfied regardless of input.
///
/// # Errors
///
/// Returns [`RequirementSetError`] when the text does not decode into
/// `{ "required": [ { "pattern": ... }, ... ] }` or a pattern is empty.
pub fn parse_requirements(
    text: &str,
    format: RequirementFormat,
) -> std::result::Result<RequirementSet, RequirementSetError> {
    let document: RequirementSetDocument = match format {
        RequirementFormat::Json => {
            serde_json::from_str(text).map_err(|e| RequirementSetError::new(e.to_string()))?
        }
        RequirementFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| RequirementSetError::new(e.to_string()))?
        }
    };

    if let Some(index) = document.required.iter().position(|e| e.pattern.is_empty()) {
        return Err(RequirementSetError::new(format!(
            "required[{}]: pattern must not be empty",
            index
        )));
    }

    let set: RequirementSet = document
        .required
        .into_iter()
        .map(Requirement::from)
        .collect();
    debug!("Loaded {} requirement(s)", set.len());
    Ok(set)
}

/// Read a requirement-set file as text.
///
/// # Errors
///
/// Returns `RequirementSetNotFound` if the file doesn't exist.
pub fn read_requirements_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShapecheckError::RequirementSetNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShapecheckError::Io(e)
        }
    })
}
