//! Go syntax parsing using tree-sitter.
//!
//! tree-sitter always produces a tree, recovering from bad input with
//! `ERROR` and `MISSING` nodes. The extractor only works on files that are
//! valid Go, so any recovered node turns into a [`ExtractError::Parse`]. A
//! few rules the grammar is lenient about (package clause first, no
//! statements at top level, imports before other declarations) are checked
//! here as well.

use tracing::debug;
use tree_sitter::{Language, Node, Parser, Tree};

use super::source::SourceFile;
use crate::error::ExtractError;

/// Longest snippet of offending text quoted in a syntax error.
const MAX_SNIPPET_LEN: usize = 24;

/// Holds a parsed tree-sitter tree and the source it came from.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// The parsed source (kept for node text and line slicing).
    pub source: SourceFile,
}

impl ParsedFile {
    /// The file path (for diagnostics).
    pub fn path(&self) -> &str {
        &self.source.path
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.text().as_bytes()).unwrap_or("")
    }
}

/// Go parser.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    /// Create a new Go parser.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// The Go grammar.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Create a tree-sitter parser for this call.
    fn create_parser(&self) -> Result<Parser, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse a loaded source file.
    pub fn parse(&self, source: SourceFile) -> Result<ParsedFile, ExtractError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source.text(), None).ok_or_else(|| {
            ExtractError::Internal(format!("parser produced no tree for {}", source.path))
        })?;

        let parsed = ParsedFile { tree, source };
        let root = parsed.tree.root_node();

        if root.has_error() {
            return Err(ExtractError::Parse(syntax_error(&parsed, root)));
        }
        check_top_level(&parsed, root)?;

        debug!(
            path = %parsed.path(),
            top_level = root.named_child_count(),
            "parsed source"
        );
        Ok(parsed)
    }

    /// Parse source text held in memory.
    pub fn parse_str(&self, path: &str, text: &str) -> Result<ParsedFile, ExtractError> {
        self.parse(SourceFile::new(path, text.to_string()))
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

/// Build a `file:line:col: message` diagnostic for a tree with errors.
fn syntax_error(parsed: &ParsedFile, root: Node) -> String {
    let node = first_error(root).unwrap_or(root);
    let message = if node.is_missing() {
        format!("syntax error: missing '{}'", node.kind())
    } else {
        let text = parsed.node_text(node);
        let line = text.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            "syntax error: unexpected end of file".to_string()
        } else {
            let snippet: String = line.chars().take(MAX_SNIPPET_LEN).collect();
            format!("syntax error: unexpected `{}`", snippet)
        }
    };
    position_message(parsed, node, &message)
}

fn position_message(parsed: &ParsedFile, node: Node, message: &str) -> String {
    let pos = node.start_position();
    format!("{}:{}:{}: {}", parsed.path(), pos.row + 1, pos.column + 1, message)
}

/// Enforce the file-level shape rules the grammar accepts loosely.
fn check_top_level(parsed: &ParsedFile, root: Node) -> Result<(), ExtractError> {
    let mut seen_package = false;
    let mut seen_decl = false;

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let kind = child.kind();
        if kind == "comment" {
            continue;
        }
        if !seen_package {
            if kind != "package_clause" {
                return Err(ExtractError::Parse(position_message(
                    parsed,
                    child,
                    "expected 'package' clause",
                )));
            }
            seen_package = true;
            continue;
        }
        match kind {
            "import_declaration" if seen_decl => {
                return Err(ExtractError::Parse(position_message(
                    parsed,
                    child,
                    "syntax error: imports must appear before other declarations",
                )));
            }
            "import_declaration" => {}
            "function_declaration" | "method_declaration" | "const_declaration"
            | "var_declaration" | "type_declaration" => seen_decl = true,
            _ => {
                return Err(ExtractError::Parse(position_message(
                    parsed,
                    child,
                    "syntax error: non-declaration statement outside function body",
                )));
            }
        }
    }

    if !seen_package {
        return Err(ExtractError::Parse(format!(
            "{}:1:1: expected 'package' clause",
            parsed.path()
        )));
    }
    Ok(())
}
