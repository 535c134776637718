//! Record structures produced by extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source location span with byte offsets and line positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// End line (1-indexed, inclusive).
    pub end_line: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: node.start_position().row + 1, // tree-sitter is 0-indexed
            end_line: node.end_position().row + 1,
        }
    }

    /// Number of lines covered.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_line, self.end_line)
    }
}

/// Metadata for one function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// One descriptor per parameter slot.
    pub parameters: Vec<String>,
    /// Result descriptors joined with `", "`.
    pub returns: String,
    /// Distinct called names, sorted.
    pub calls: Vec<String>,
    pub is_method: bool,
    /// Receiver descriptor (`T`, `*T`), empty for plain functions.
    pub receiver: String,
    #[serde(rename = "docstring")]
    pub doc_string: String,
    /// Verbatim source of `start_line..=end_line`.
    pub raw_code: String,
}

impl DeclarationRecord {
    /// Name qualified with the receiver type (`*Config.Validate`).
    pub fn qualified_name(&self) -> String {
        if self.is_method && !self.receiver.is_empty() {
            format!("{}.{}", self.receiver, self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Everything extracted from a single file.
///
/// Serialized as `{"functions": [...], "imports": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "functions")]
    pub declarations: Vec<DeclarationRecord>,
    /// `"path"` or `"alias path"`, in source order.
    pub imports: Vec<String>,
}

impl FileRecord {
    /// Find a declaration by name.
    pub fn find_declaration(&self, name: &str) -> Option<&DeclarationRecord> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// All method declarations.
    pub fn methods(&self) -> impl Iterator<Item = &DeclarationRecord> {
        self.declarations.iter().filter(|d| d.is_method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, receiver: &str) -> DeclarationRecord {
        DeclarationRecord {
            name: name.to_string(),
            start_line: 3,
            end_line: 5,
            parameters: vec![],
            returns: String::new(),
            calls: vec![],
            is_method: !receiver.is_empty(),
            receiver: receiver.to_string(),
            doc_string: String::new(),
            raw_code: "func x() {\n}\n".to_string(),
        }
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(record("main", "").qualified_name(), "main");
        assert_eq!(record("Validate", "*Config").qualified_name(), "*Config.Validate");
    }

    #[test]
    fn test_span_line_count() {
        let span = Span {
            start_byte: 0,
            end_byte: 10,
            start_line: 4,
            end_line: 4,
        };
        assert_eq!(span.line_count(), 1);
        assert_eq!(span.to_string(), "4-4");
    }

    #[test]
    fn test_json_field_names_and_order() {
        let file = FileRecord {
            declarations: vec![record("f", "")],
            imports: vec!["fmt".to_string()],
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.starts_with(r#"{"functions":[{"name":"f","start_line":3,"end_line":5,"parameters":[],"returns":"","calls":[],"is_method":false,"receiver":"","docstring":"","raw_code":"#));
        assert!(json.ends_with(r#""imports":["fmt"]}"#));
    }

    #[test]
    fn test_empty_record_serializes_arrays() {
        let json = serde_json::to_string(&FileRecord::default()).unwrap();
        assert_eq!(json, r#"{"functions":[],"imports":[]}"#);
    }
}
