//! Settings validation rules.
//!
//! Runs on both the merged raw YAML (so unknown keys are caught before
//! serde silently drops them) and the typed settings.

use serde_yaml::Value;

use crate::config::schema::{Settings, ShapecheckConfig};
use crate::error::{Result, ShapecheckError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Check the raw document for keys the schema does not know.
pub fn validate_keys(value: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Value::Mapping(root) = value else {
        if !value.is_null() {
            errors.push(ValidationError::new(
                "not-a-mapping",
                "Configuration must be a mapping",
            ));
        }
        return errors;
    };

    for (key, child) in root {
        match key.as_str() {
            Some("settings") => {
                if let Value::Mapping(settings) = child {
                    for setting in settings.keys() {
                        let name = setting.as_str().unwrap_or_default();
                        if !Settings::KEYS.contains(&name) {
                            errors.push(ValidationError::new(
                                "unknown-setting",
                                format!("Unknown setting '{}'", name),
                            ));
                        }
                    }
                }
            }
            Some(other) => errors.push(ValidationError::new(
                "unknown-key",
                format!("Unknown top-level key '{}'", other),
            )),
            None => errors.push(ValidationError::new(
                "unknown-key",
                "Top-level keys must be strings",
            )),
        }
    }

    errors
}

/// Validate typed settings and return all errors.
pub fn validate_config(config: &ShapecheckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let settings = &config.settings;

    if settings.max_nodes == Some(0) {
        errors.push(ValidationError::new(
            "zero-max-nodes",
            "max_nodes must be greater than zero",
        ));
    }

    if let Some(path) = &settings.requirements {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "empty-requirements",
                "requirements path must not be empty",
            ));
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ShapecheckConfig) -> Result<()> {
    into_result(validate_config(config))
}

pub(crate) fn into_result(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ShapecheckError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
