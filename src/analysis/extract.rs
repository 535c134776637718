//! Record assembly: runs every extractor over a parsed file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use tree_sitter::Node;

use super::calls::collect_calls;
use super::docs::extract_docstring;
use super::facts::{DeclarationRecord, FileRecord, Span};
use super::imports::{extract_imports, Import};
use super::parser::{GoParser, ParsedFile};
use super::source::SourceFile;
use super::types::{parameter_types, receiver_type, result_types};
use super::walker::declarations;
use crate::error::ExtractError;

/// Knobs for an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Record member calls as `operand.Name` instead of `Name`.
    pub qualified_calls: bool,
}

/// Extracts a [`FileRecord`] from Go source.
#[derive(Default)]
pub struct Extractor {
    parser: GoParser,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            parser: GoParser::new(),
            options,
        }
    }

    /// Load, parse and extract a file from disk.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<FileRecord, ExtractError> {
        let source = SourceFile::load(path)?;
        let parsed = self.parser.parse(source)?;
        self.extract_parsed(&parsed)
    }

    /// Parse and extract source held in memory. `path` is only used in
    /// diagnostics.
    pub fn extract_source(&self, path: &str, text: &str) -> Result<FileRecord, ExtractError> {
        let parsed = self.parser.parse_str(path, text)?;
        self.extract_parsed(&parsed)
    }

    /// Build the record for an already parsed file.
    pub fn extract_parsed(&self, parsed: &ParsedFile) -> Result<FileRecord, ExtractError> {
        let imports: Vec<String> = extract_imports(self.parser.language(), parsed)?
            .iter()
            .map(Import::descriptor)
            .collect();

        let declarations: Vec<DeclarationRecord> = declarations(parsed.tree.root_node())
            .into_iter()
            .map(|node| self.declaration_record(node, parsed))
            .collect();

        debug!(
            path = %parsed.path(),
            declarations = declarations.len(),
            imports = imports.len(),
            "extracted file record"
        );

        Ok(FileRecord {
            declarations,
            imports,
        })
    }

    fn declaration_record(&self, node: Node, parsed: &ParsedFile) -> DeclarationRecord {
        let span = Span::from_node(node);
        let name = node
            .child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
            .unwrap_or_default();
        let receiver = receiver_type(node.child_by_field_name("receiver"), parsed);
        let raw_code = parsed
            .source
            .lines_between(span.start_line, span.end_line)
            .unwrap_or_default()
            .to_string();

        let record = DeclarationRecord {
            name,
            start_line: span.start_line,
            end_line: span.end_line,
            parameters: parameter_types(node.child_by_field_name("parameters"), parsed),
            returns: result_types(node.child_by_field_name("result"), parsed),
            calls: collect_calls(node, parsed, self.options.qualified_calls),
            is_method: receiver.is_some(),
            receiver: receiver.unwrap_or_default(),
            doc_string: extract_docstring(node, parsed),
            raw_code,
        };
        trace!(
            name = %record.qualified_name(),
            span = %span,
            lines = span.line_count(),
            "declaration"
        );
        record
    }
}

/// Extract a file from disk with the given options.
pub fn extract_file<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<FileRecord, ExtractError> {
    Extractor::new(options.clone()).extract_file(path)
}

/// Extract source held in memory with the given options.
pub fn extract_source(
    path: &str,
    text: &str,
    options: &ExtractOptions,
) -> Result<FileRecord, ExtractError> {
    Extractor::new(options.clone()).extract_source(path, text)
}
