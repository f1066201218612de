//! Conversion from ESTree JSON documents.
//!
//! ESTree is the JSON shape emitted by JavaScript parsers such as esprima.
//! Object key order is preserved, so the resulting fields are visited in
//! the same order the document lists them.

use serde_json::{Map, Value};

use super::node::{FieldValue, Scalar, TreeNode, TYPE_FIELD};

/// Convert a JSON object into a [`TreeNode`].
///
/// - Objects become [`FieldValue::Node`]
/// - Arrays become [`FieldValue::NodeSequence`]; nested arrays are flattened
///   and non-object elements (holes, scalars) are skipped
/// - A scalar under the `type` key becomes [`Scalar::TypeLabel`]
/// - Every other scalar is kept as-is
pub fn from_object(object: &Map<String, Value>) -> TreeNode {
    let mut node = TreeNode::new();
    for (key, value) in object {
        let field = match value {
            Value::Object(child) => FieldValue::Node(from_object(child)),
            Value::Array(items) => {
                let mut nodes = Vec::new();
                collect_nodes(items, &mut nodes);
                FieldValue::NodeSequence(nodes)
            }
            scalar if key == TYPE_FIELD => FieldValue::Scalar(Scalar::TypeLabel(label_text(scalar))),
            scalar => FieldValue::Scalar(to_scalar(scalar)),
        };
        node.push(key.clone(), field);
    }
    node
}

fn collect_nodes(items: &[Value], out: &mut Vec<TreeNode>) {
    for item in items {
        match item {
            Value::Object(child) => out.push(from_object(child)),
            Value::Array(inner) => collect_nodes(inner, out),
            _ => {}
        }
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_scalar(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => Scalar::Number(n.clone()),
        Value::String(s) => Scalar::Text(s.clone()),
        // Objects and arrays are handled by the caller.
        Value::Object(_) | Value::Array(_) => Scalar::Null,
    }
}
