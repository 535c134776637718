//! Import extraction.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Query, QueryCursor};

use super::parser::ParsedFile;
use crate::error::ExtractError;

/// Tree-sitter query for import specs, grouped or not.
///
/// The local name can be an identifier, `.` or `_`.
const IMPORT_QUERY: &str = r#"
(import_spec
  name: (_)? @alias
  path: (_) @path
) @import
"#;

/// An import directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The import path without its delimiters.
    pub path: String,
    /// Optional local name (e.g., `import log "github.com/sirupsen/logrus"`).
    pub alias: Option<String>,
    /// Start byte of the import spec (orders the results).
    pub start_byte: usize,
}

impl Import {
    /// Render as `"path"` or `"alias path"`.
    pub fn descriptor(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {}", alias, self.path),
            None => self.path.clone(),
        }
    }
}

/// Extract imports in source order. Duplicates are kept.
pub fn extract_imports(
    language: &Language,
    parsed: &ParsedFile,
) -> Result<Vec<Import>, ExtractError> {
    let query = Query::new(language, IMPORT_QUERY)
        .map_err(|e| ExtractError::Internal(format!("invalid import query: {}", e)))?;
    let mut cursor = QueryCursor::new();
    let source = parsed.source.text().as_bytes();
    let mut matches = cursor.matches(&query, parsed.tree.root_node(), source);

    let mut imports = Vec::new();

    while let Some(m) = matches.next() {
        let mut path = None;
        let mut alias = None;
        let mut start_byte = 0;

        for capture in m.captures {
            let name = query.capture_names()[capture.index as usize];
            match name {
                "path" => {
                    let raw = parsed.node_text(capture.node);
                    path = Some(raw.trim_matches(&['"', '`'][..]).to_string());
                }
                "alias" => {
                    alias = Some(parsed.node_text(capture.node).to_string());
                }
                "import" => {
                    start_byte = capture.node.start_byte();
                }
                _ => {}
            }
        }

        if let Some(path) = path {
            imports.push(Import {
                path,
                alias,
                start_byte,
            });
        }
    }

    imports.sort_by_key(|i| i.start_byte);

    Ok(imports)
}
