//! Error kinds for a single extraction run.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_INTERNAL: i32 = 2;

/// Errors that abort an extraction run.
///
/// Every variant is terminal: nothing is retried and no partial record is
/// written.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Wrong invocation (missing or extra arguments, unknown flags).
    #[error("{0}")]
    Argument(String),

    /// The source file is missing or unreadable.
    #[error("error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not syntactically valid Go.
    #[error("error parsing file: {0}")]
    Parse(String),

    /// An invariant of the extractor itself failed (grammar load, encoding).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::Argument(_) | ExtractError::Read { .. } | ExtractError::Parse(_) => {
                EXIT_FAILED
            }
            ExtractError::Internal(_) => EXIT_INTERNAL,
        }
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::Internal(format!("failed to encode JSON: {}", err))
    }
}

impl From<tree_sitter::LanguageError> for ExtractError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        ExtractError::Internal(format!("failed to load Go grammar: {}", err))
    }
}
