//! Parse adapter for ESTree JSON documents.
//!
//! ESTree documents nest one JSON object per syntax node, so a long binary
//! expression chain easily exceeds serde_json's default nesting limit of
//! 128. The limit is disabled here; depth is bounded by the traversal guard
//! instead.

use serde::Deserialize;
use serde_json::Value;

use super::{ParseAdapter, SourceParseError};
use crate::tree::{estree, TreeNode};

/// Accepts the JSON a JavaScript parser emits and converts it to a tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstreeJsonParser;

impl EstreeJsonParser {
    /// Create a new ESTree JSON adapter.
    pub fn new() -> Self {
        Self
    }
}

impl ParseAdapter for EstreeJsonParser {
    fn name(&self) -> &str {
        "estree-json"
    }

    fn parse(&self, source: &str) -> Result<TreeNode, SourceParseError> {
        let value = decode(source).map_err(|e| {
            SourceParseError::new(format!("Invalid ESTree JSON: {}", e)).at(e.line(), e.column())
        })?;

        match value {
            Value::Object(map) => Ok(estree::from_object(&map)),
            other => Err(SourceParseError::new(format!(
                "ESTree root must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Decode a whole document without a nesting limit.
fn decode(source: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
