//! Error types for shapecheck operations.
//!
//! This module defines [`ShapecheckError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Failures inside one analysis run (bad requirement set, unparsable
//!   source, traversal guard) are captured in the
//!   [`AnalysisReport`](crate::analysis::AnalysisReport), never returned as
//!   `Err`; the report's diagnostic is the matching variant's message
//! - The `paths` and `tree` commands have no report and return those same
//!   variants as `Err`
//! - `ShapecheckError` covers everything outside a run: missing files,
//!   broken settings, watcher setup
//! - Use `anyhow::Error` (via `ShapecheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::{
    TraversalLimitExceeded, LIMIT_ERROR_PREFIX, LOAD_ERROR_PREFIX, PARSE_ERROR_PREFIX,
};
use crate::parse::SourceParseError;
use crate::requirements::RequirementSetError;

/// Core error type for shapecheck operations.
#[derive(Debug, Error)]
pub enum ShapecheckError {
    /// Settings file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Settings parsed but hold invalid values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requirement set file does not exist.
    #[error("Requirement set not found: {path}")]
    RequirementSetNotFound { path: PathBuf },

    /// Requirement set text failed to decode.
    #[error("{prefix}: {0}", prefix = LOAD_ERROR_PREFIX)]
    InvalidRequirementSet(#[from] RequirementSetError),

    /// Source file does not exist.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source text failed to parse.
    #[error("{prefix}: {0}", prefix = PARSE_ERROR_PREFIX)]
    SourceParse(#[from] SourceParseError),

    /// Traversal visited more nodes than allowed.
    #[error("{prefix}: {0}", prefix = LIMIT_ERROR_PREFIX)]
    TraversalLimit(#[from] TraversalLimitExceeded),

    /// Unrecognized language name.
    #[error("Unknown language: {name}")]
    UnknownLanguage { name: String },

    /// File watcher could not be started.
    #[error("Watch failed: {message}")]
    WatchFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for shapecheck operations.
pub type Result<T> = std::result::Result<T, ShapecheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ShapecheckError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ShapecheckError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn requirement_set_not_found_displays_path() {
        let err = ShapecheckError::RequirementSetNotFound {
            path: PathBuf::from("reqs.json"),
        };
        assert!(err.to_string().contains("reqs.json"));
    }

    #[test]
    fn invalid_requirement_set_is_prefixed() {
        let inner = RequirementSetError::new("expected an object");
        let err: ShapecheckError = inner.into();
        assert_eq!(
            err.to_string(),
            format!("{}: expected an object", LOAD_ERROR_PREFIX)
        );
    }

    #[test]
    fn source_parse_error_is_prefixed() {
        let inner = SourceParseError::new("Line 1: Unexpected token }").at(1, 1);
        let err: ShapecheckError = inner.into();
        assert!(matches!(err, ShapecheckError::SourceParse(_)));
        assert_eq!(
            err.to_string(),
            format!("{}: Line 1: Unexpected token }}", PARSE_ERROR_PREFIX)
        );
    }

    #[test]
    fn traversal_limit_is_prefixed() {
        let inner = TraversalLimitExceeded {
            limit: 5,
            paths: Vec::new(),
        };
        let err: ShapecheckError = inner.into();
        assert!(err.to_string().starts_with(LIMIT_ERROR_PREFIX));
        assert!(err.to_string().contains("5 nodes"));
    }

    #[test]
    fn unknown_language_displays_name() {
        let err = ShapecheckError::UnknownLanguage {
            name: "cobol".into(),
        };
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShapecheckError = io_err.into();
        assert!(matches!(err, ShapecheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ShapecheckError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
