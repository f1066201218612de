//! JavaScript parse adapter backed by tree-sitter.
//!
//! tree-sitter names nodes in snake case (`for_statement`). Requirement
//! patterns are written against ESTree names (`ForStatement`), so every node
//! kind is projected onto its ESTree label while converting.
//!
//! Conversion rules:
//!
//! - Named grammar fields become [`TreeNode`] fields; unnamed children are
//!   grouped under `body`
//! - Wrappers with no ESTree counterpart (`parenthesized_expression`,
//!   `arguments`, `else_clause`, ...) are transparent: their children are
//!   attached to the enclosing node
//! - Comments and punctuation are dropped; empty `for` header clauses are
//!   absent, as in ESTree
//! - Keyword and operator tokens that carry a field name become scalars
//! - Literal leaves keep their source text under `raw`; identifiers under
//!   `name`
//! - An optional chain (`a?.b`) is wrapped in a `ChainExpression` at its
//!   outermost link; the `?.` token itself adds no node
//! - A default import binding becomes an `ImportDefaultSpecifier`
//!
//! tree-sitter accepts some programs an ECMAScript parser rejects as early
//! errors: top-level `return 1;`, `let let = 1;` and legacy octal literals
//! such as `08` all convert without a syntax error. Only `ERROR` and
//! `MISSING` nodes fail the parse.

use std::borrow::Cow;

use tree_sitter::{Node, Parser};

use super::{ParseAdapter, SourceParseError};
use crate::tree::{Scalar, TreeNode};

/// Field name for children the grammar leaves unnamed.
const DEFAULT_FIELD: &str = "body";

/// Clauses of a `for (init; test; update)` header.
const FOR_HEADER_FIELDS: &[&str] = &["initializer", "condition", "increment"];

const TRANSPARENT_KINDS: &[&str] = &[
    "parenthesized_expression",
    "formal_parameters",
    "arguments",
    "else_clause",
    "finally_clause",
    "switch_body",
    "template_substitution",
    "class_heritage",
    "computed_property_name",
    "import_clause",
    "named_imports",
    "export_clause",
    "namespace_export",
];

const SKIPPED_KINDS: &[&str] = &[
    "comment",
    "html_comment",
    "hash_bang_line",
    "string_fragment",
    "escape_sequence",
    "optional_chain",
];

const LITERAL_KINDS: &[&str] = &["number", "string", "true", "false", "null", "regex"];

const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "private_property_identifier",
    "statement_identifier",
    "undefined",
];

/// Links of a member/call chain and the field holding the previous link.
const CHAIN_LINKS: &[(&str, &str)] = &[
    ("member_expression", "object"),
    ("subscript_expression", "object"),
    ("call_expression", "function"),
];

const PUNCTUATION: &[&str] = &[";", ",", "(", ")", "{", "}", "[", "]", ":", "."];

/// Parses JavaScript source with the tree-sitter JavaScript grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptParser;

impl JavaScriptParser {
    /// Create a new JavaScript adapter.
    pub fn new() -> Self {
        Self
    }
}

impl ParseAdapter for JavaScriptParser {
    fn name(&self) -> &str {
        "javascript"
    }

    fn parse(&self, source: &str) -> Result<TreeNode, SourceParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| SourceParseError::new(format!("JavaScript grammar unavailable: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| SourceParseError::new("JavaScript parser produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(syntax_error(root, source.as_bytes()));
        }

        let converter = Converter {
            source: source.as_bytes(),
        };
        Ok(converter.convert(root))
    }
}

/// Build a parse error from the first `ERROR` or `MISSING` node.
fn syntax_error(root: Node<'_>, source: &[u8]) -> SourceParseError {
    let Some(node) = first_error(root) else {
        return SourceParseError::new("Unexpected syntax error");
    };

    let point = node.start_position();
    let (line, column) = (point.row + 1, point.column + 1);

    let message = if node.is_missing() {
        format!("Line {}: Missing {}", line, node.kind())
    } else {
        let token: String = node
            .utf8_text(source)
            .ok()
            .and_then(|text| text.split_whitespace().next())
            .map(|t| t.chars().take(20).collect())
            .unwrap_or_default();
        if token.is_empty() {
            format!("Line {}: Unexpected end of input", line)
        } else {
            format!("Line {}: Unexpected token {}", line, token)
        }
    };

    SourceParseError::new(message).at(line, column)
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// How a child participates in the converted tree.
enum Role {
    Skip,
    Token,
    Transparent,
    Node,
}

fn classify(child: Node<'_>, own_field: Option<&str>, field: Option<&str>) -> Role {
    let kind = child.kind();

    if !child.is_named() {
        return if own_field.is_some() && !PUNCTUATION.contains(&kind) {
            Role::Token
        } else {
            Role::Skip
        };
    }
    if child.is_extra() || SKIPPED_KINDS.contains(&kind) {
        return Role::Skip;
    }

    let in_for_header = field.is_some_and(|f| FOR_HEADER_FIELDS.contains(&f));
    match kind {
        "empty_statement" if in_for_header => Role::Skip,
        "expression_statement" if in_for_header => Role::Transparent,
        _ if TRANSPARENT_KINDS.contains(&kind) => Role::Transparent,
        _ => Role::Node,
    }
}

struct Converter<'s> {
    source: &'s [u8],
}

impl Converter<'_> {
    fn convert(&self, node: Node<'_>) -> TreeNode {
        if is_chain_head(node) {
            return TreeNode::typed("ChainExpression")
                .with_child("expression", self.convert_node(node));
        }
        let in_import_clause = node.parent().is_some_and(|p| p.kind() == "import_clause");
        if node.kind() == "identifier" && in_import_clause {
            return TreeNode::typed("ImportDefaultSpecifier")
                .with_child("local", self.convert_node(node));
        }
        self.convert_node(node)
    }

    fn convert_node(&self, node: Node<'_>) -> TreeNode {
        let kind = node.kind();
        let mut out = TreeNode::typed(self.label(node));

        if LITERAL_KINDS.contains(&kind) {
            return out.with_scalar("raw", Scalar::Text(self.text(node)));
        }
        if IDENTIFIER_KINDS.contains(&kind) {
            return out.with_scalar("name", Scalar::Text(self.text(node)));
        }

        self.collect(node, None, &mut out);
        out
    }

    fn collect(&self, node: Node<'_>, inherited: Option<&'static str>, out: &mut TreeNode) {
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return;
        }

        loop {
            let child = cursor.node();
            let own_field = cursor.field_name();
            let field = own_field.or(inherited);

            match classify(child, own_field, field) {
                Role::Skip => {}
                Role::Token => {
                    if let Some(name) = own_field {
                        out.push_scalar(name, Scalar::Text(self.text(child)));
                    }
                }
                Role::Transparent => self.collect(child, field, out),
                Role::Node => out.push_grouped(field.unwrap_or(DEFAULT_FIELD), self.convert(child)),
            }

            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    fn text(&self, node: Node<'_>) -> String {
        node.utf8_text(self.source).unwrap_or_default().to_string()
    }

    fn operator(&self, node: Node<'_>) -> Option<&'static str> {
        node.child_by_field_name("operator").map(|op| op.kind())
    }

    fn label(&self, node: Node<'_>) -> Cow<'static, str> {
        let kind = node.kind();
        if LITERAL_KINDS.contains(&kind) {
            return Cow::Borrowed("Literal");
        }
        if IDENTIFIER_KINDS.contains(&kind) {
            return Cow::Borrowed("Identifier");
        }

        let label = match kind {
            "program" => "Program",
            "statement_block" => "BlockStatement",
            "do_statement" => "DoWhileStatement",
            "for_in_statement" => match self.operator(node) {
                Some("of") => "ForOfStatement",
                _ => "ForInStatement",
            },
            "binary_expression" => match self.operator(node) {
                Some("&&" | "||" | "??") => "LogicalExpression",
                _ => "BinaryExpression",
            },
            "lexical_declaration" | "variable_declaration" => "VariableDeclaration",
            "subscript_expression" => "MemberExpression",
            "augmented_assignment_expression" => "AssignmentExpression",
            "ternary_expression" => "ConditionalExpression",
            "pair" => "Property",
            "object" => "ObjectExpression",
            "array" => "ArrayExpression",
            "function" | "function_expression" | "generator_function" => "FunctionExpression",
            "generator_function_declaration" => "FunctionDeclaration",
            "arrow_function" => "ArrowFunctionExpression",
            "class" => "ClassExpression",
            "this" => "ThisExpression",
            "switch_default" => "SwitchCase",
            "template_string" => "TemplateLiteral",
            "call_expression" => match node.child_by_field_name("arguments") {
                Some(args) if args.kind() == "template_string" => "TaggedTemplateExpression",
                _ => "CallExpression",
            },
            "rest_pattern" => "RestElement",
            "pair_pattern" => "Property",
            "object_assignment_pattern" => "AssignmentPattern",
            "field_definition" => "PropertyDefinition",
            "import_statement" => "ImportDeclaration",
            "namespace_import" => "ImportNamespaceSpecifier",
            "export_statement" => export_label(node),
            _ => return Cow::Owned(pascal_case(kind)),
        };
        Cow::Borrowed(label)
    }
}

fn export_label(node: Node<'_>) -> &'static str {
    let mut cursor = node.walk();
    let marker = node
        .children(&mut cursor)
        .map(|c| c.kind())
        .find(|kind| matches!(*kind, "default" | "*" | "namespace_export"));
    match marker {
        Some("default") => "ExportDefaultDeclaration",
        Some(_) => "ExportAllDeclaration",
        None => "ExportNamedDeclaration",
    }
}

/// Whether `node` is a link of a member/call chain.
fn chain_field(node: Node<'_>) -> Option<&'static str> {
    CHAIN_LINKS
        .iter()
        .find(|(kind, _)| *kind == node.kind())
        .map(|(_, field)| *field)
}

/// Whether the chain ending at `node` contains an `?.` link.
fn has_optional_link(node: Node<'_>) -> bool {
    let Some(field) = chain_field(node) else {
        return false;
    };
    let mut cursor = node.walk();
    if node.children(&mut cursor).any(|c| c.kind() == "optional_chain") {
        return true;
    }
    node.child_by_field_name(field)
        .is_some_and(has_optional_link)
}

/// The outermost link of an optional chain: the chain does not continue
/// into the parent and some link uses `?.`.
fn is_chain_head(node: Node<'_>) -> bool {
    if chain_field(node).is_none() {
        return false;
    }
    let continues = node.parent().is_some_and(|parent| {
        chain_field(parent).is_some_and(|field| parent.child_by_field_name(field) == Some(node))
    });
    !continues && has_optional_link(node)
}

/// `for_statement` -> `ForStatement`.
fn pascal_case(kind: &str) -> String {
    kind.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
