//! Tree node types.
//!
//! A [`TreeNode`] is an ordered list of named fields. Every field value is
//! one of three variants ([`FieldValue`]); the node's type label is a
//! dedicated [`Scalar::TypeLabel`] so traversal never compares field names.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Field name under which a node's type label is stored.
pub const TYPE_FIELD: &str = "type";

/// A syntax tree node produced by a parse adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    fields: Vec<Field>,
}

/// One named field of a [`TreeNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name (e.g. `body`, `init`).
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

/// Value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single child node.
    Node(TreeNode),
    /// An ordered sequence of child nodes.
    NodeSequence(Vec<TreeNode>),
    /// A leaf value.
    Scalar(Scalar),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// The node's type label (e.g. `ForStatement`).
    TypeLabel(String),
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, kept in its JSON representation.
    Number(serde_json::Number),
    /// Any other text.
    Text(String),
}

impl TreeNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node whose first field is the given type label.
    pub fn typed(label: impl Into<String>) -> Self {
        Self::new().with_type(label)
    }

    /// Append a type label field.
    pub fn with_type(mut self, label: impl Into<String>) -> Self {
        self.push_scalar(TYPE_FIELD, Scalar::TypeLabel(label.into()));
        self
    }

    /// Append a single-child field.
    pub fn with_child(mut self, name: impl Into<String>, child: TreeNode) -> Self {
        self.push(name, FieldValue::Node(child));
        self
    }

    /// Append a node-sequence field.
    pub fn with_children(mut self, name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        self.push(name, FieldValue::NodeSequence(children));
        self
    }

    /// Append a scalar field.
    pub fn with_scalar(mut self, name: impl Into<String>, value: Scalar) -> Self {
        self.push_scalar(name, value);
        self
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push(Field {
            name: name.into(),
            value,
        });
    }

    /// Append a scalar field.
    pub fn push_scalar(&mut self, name: impl Into<String>, value: Scalar) {
        self.push(name, FieldValue::Scalar(value));
    }

    /// Append a child under `name`, merging with an immediately preceding
    /// field of the same name into a sequence.
    pub fn push_grouped(&mut self, name: &str, child: TreeNode) {
        if let Some(last) = self.fields.last_mut() {
            if last.name == name {
                let taken = std::mem::replace(&mut last.value, FieldValue::NodeSequence(Vec::new()));
                match taken {
                    FieldValue::NodeSequence(mut seq) => {
                        seq.push(child);
                        last.value = FieldValue::NodeSequence(seq);
                        return;
                    }
                    FieldValue::Node(prev) => {
                        last.value = FieldValue::NodeSequence(vec![prev, child]);
                        return;
                    }
                    scalar @ FieldValue::Scalar(_) => last.value = scalar,
                }
            }
        }
        self.push(name, FieldValue::Node(child));
    }

    /// Fields in their defined order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The first type label of this node, if any.
    pub fn kind(&self) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Scalar(Scalar::TypeLabel(label)) => Some(label.as_str()),
            _ => None,
        })
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// Render as a pretty JSON string for diagnostics.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Node(node) => node.serialize(serializer),
            FieldValue::NodeSequence(nodes) => {
                let mut seq = serializer.serialize_seq(Some(nodes.len()))?;
                for node in nodes {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
            FieldValue::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::TypeLabel(s) | Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Null => serializer.serialize_none(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_node_reports_kind() {
        let node = TreeNode::typed("Program");
        assert_eq!(node.kind(), Some("Program"));
    }

    #[test]
    fn untyped_node_has_no_kind() {
        let node = TreeNode::new().with_scalar("line", Scalar::Number(1.into()));
        assert_eq!(node.kind(), None);
    }

    #[test]
    fn push_grouped_builds_sequences() {
        let mut node = TreeNode::typed("Program");
        node.push_grouped("body", TreeNode::typed("EmptyStatement"));
        assert!(matches!(node.get("body"), Some(FieldValue::Node(_))));

        node.push_grouped("body", TreeNode::typed("ForStatement"));
        node.push_grouped("body", TreeNode::typed("WhileStatement"));
        match node.get("body") {
            Some(FieldValue::NodeSequence(seq)) => {
                let kinds: Vec<_> = seq.iter().filter_map(TreeNode::kind).collect();
                assert_eq!(kinds, ["EmptyStatement", "ForStatement", "WhileStatement"]);
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn push_grouped_does_not_merge_across_other_fields() {
        let mut node = TreeNode::typed("IfStatement");
        node.push_grouped("test", TreeNode::typed("Identifier"));
        node.push_grouped("consequent", TreeNode::typed("BlockStatement"));
        node.push_grouped("test", TreeNode::typed("Identifier"));
        assert_eq!(node.fields().len(), 4);
    }

    #[test]
    fn serializes_in_field_order() {
        let tree = TreeNode::typed("Identifier")
            .with_scalar("name", Scalar::Text("x".into()))
            .with_scalar("optional", Scalar::Bool(false));
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"type":"Identifier","name":"x","optional":false}"#);
    }
}
