//! Requirement sets: what the analyzed source must (or must not) contain.
//!
//! # Modules
//!
//! - [`set`] - [`Requirement`], [`RequirementSet`] and the on-disk document
//! - [`loader`] - Decoding requirement-set text into a fresh set
//!
//! # Example
//!
//! ```
//! use shapecheck::requirements::{parse_requirements, RequirementFormat};
//!
//! let set = parse_requirements(
//!     r#"{"required": [{"pattern": "ForStatement", "description": "Use a loop"}]}"#,
//!     RequirementFormat::Json,
//! )
//! .unwrap();
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.satisfied_count(), 0);
//! ```

pub mod loader;
pub mod set;

pub use loader::{
    parse_requirements, read_requirements_file, RequirementFormat, RequirementSetError,
};
pub use set::{Requirement, RequirementEntry, RequirementSet, RequirementSetDocument};
