//! AST-backed declaration extraction for Go.
//!
//! This module turns one Go source file into a [`FileRecord`]:
//! - Imports with optional local names
//! - Function and method declarations with their line span
//! - Parameter, result and receiver type descriptors
//! - Names called inside each declaration
//! - Doc comments and the verbatim source of each declaration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────┐   ┌──────────────┐   ┌────────────┐
//! │ SourceFile  │──▶│ GoParser │──▶│ walker       │──▶│ FileRecord │
//! │ (line index)│   │ (ts tree)│   │ types, calls │   │ (serde)    │
//! └─────────────┘   └──────────┘   │ docs, imports│   └────────────┘
//!                                  └──────────────┘
//! ```
//!
//! Each extractor is a pure function over the parsed tree; [`Extractor`]
//! wires them together.

mod calls;
mod docs;
mod extract;
mod facts;
mod imports;
mod parser;
mod source;
mod types;
mod walker;

pub use calls::collect_calls;
pub use docs::extract_docstring;
pub use extract::{extract_file, extract_source, ExtractOptions, Extractor};
pub use facts::{DeclarationRecord, FileRecord, Span};
pub use imports::{extract_imports, Import};
pub use parser::{GoParser, ParsedFile};
pub use source::SourceFile;
pub use types::{parameter_types, receiver_type, result_types, ChanDir, TypeExpr};
pub use walker::declarations;
