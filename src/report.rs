//! JSON output for file records.
//!
//! The record is written as a single document followed by a newline:
//! compact by default (one line per file, easy to stream into an indexer),
//! or indented for people reading it.

use std::io::Write;

use crate::analysis::FileRecord;
use crate::error::ExtractError;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Compact,
    Pretty,
}

/// Encode a record to a JSON string (no trailing newline).
pub fn to_json(record: &FileRecord, format: Format) -> Result<String, ExtractError> {
    let json = match format {
        Format::Compact => serde_json::to_string(record)?,
        Format::Pretty => serde_json::to_string_pretty(record)?,
    };
    Ok(json)
}

/// Write a record as JSON plus a trailing newline.
///
/// The document is fully encoded before anything is written, so an encoding
/// failure never leaves partial output behind.
pub fn write_json<W: Write>(out: &mut W, record: &FileRecord, format: Format) -> anyhow::Result<()> {
    let json = to_json(record, format)?;
    writeln!(out, "{}", json)?;
    out.flush()?;
    Ok(())
}
