//! godecl - per-declaration metadata for Go source files.
//!
//! godecl reads one Go file and emits a JSON record describing its imports
//! and every function and method: line span, parameter/result/receiver type
//! descriptors, called names, doc comment and verbatim source. It is meant
//! to be run once per file by an indexing pipeline.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: source loading, parsing and the per-declaration extractors
//! - `report`: JSON output
//! - `cli`: argument handling, logging setup, exit codes
//! - `error`: the error kinds that abort a run
//!
//! # Example
//!
//! ```no_run
//! use godecl::{extract_file, ExtractOptions};
//!
//! let record = extract_file("main.go", &ExtractOptions::default())?;
//! for decl in &record.declarations {
//!     println!("{} {}-{}", decl.name, decl.start_line, decl.end_line);
//! }
//! # Ok::<(), godecl::ExtractError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod report;

pub use analysis::{
    extract_file, extract_source, DeclarationRecord, ExtractOptions, Extractor, FileRecord,
    GoParser, ParsedFile, SourceFile, TypeExpr,
};
pub use error::ExtractError;
