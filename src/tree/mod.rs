//! Syntax tree model consumed by the path projector.
//!
//! - [`node`] - [`TreeNode`] and its closed set of field values
//! - [`estree`] - Conversion from ESTree JSON documents

pub mod estree;
pub mod node;

pub use node::{Field, FieldValue, Scalar, TreeNode, TYPE_FIELD};
