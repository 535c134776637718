//! Source loading and line-indexed slicing.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;

/// A loaded source file with a line index.
///
/// Lines are split on `\n` only, so a `\r` from CRLF files stays at the end
/// of its line and slices reproduce the file verbatim.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display path (used in diagnostics).
    pub path: String,
    /// Full source text.
    text: String,
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Read a file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let size = bytes.len();
        let file = Self::from_bytes(&path.to_string_lossy(), bytes)?;
        debug!(
            path = %file.path,
            bytes = size,
            lines = file.line_count(),
            "loaded source"
        );
        Ok(file)
    }

    /// Build from raw bytes.
    ///
    /// Bytes that are not valid UTF-8 are a parse error positioned at the
    /// first offending byte (1-based line and byte column).
    pub fn from_bytes(path: &str, bytes: Vec<u8>) -> Result<Self, ExtractError> {
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self::new(path, text)),
            Err(err) => {
                let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
                let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
                let column = match valid.iter().rposition(|&b| b == b'\n') {
                    Some(nl) => valid.len() - nl,
                    None => valid.len() + 1,
                };
                Err(ExtractError::Parse(format!(
                    "{}:{}:{}: illegal UTF-8 encoding",
                    path, line, column
                )))
            }
        }
    }

    /// Build from text already in memory.
    pub fn new(path: &str, text: String) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            path: path.to_string(),
            text,
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines. A trailing newline opens one last, empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get a single line (1-indexed) without its terminator.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines_between(line, line)
    }

    /// Get lines `start..=end` (1-indexed), newline-joined, verbatim.
    ///
    /// Returns None when the range is empty or falls outside the file.
    pub fn lines_between(&self, start: usize, end: usize) -> Option<&str> {
        if start == 0 || start > end || end > self.line_count() {
            return None;
        }
        let from = self.line_starts[start - 1];
        let to = match self.line_starts.get(end) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        Some(&self.text[from..to])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let file = SourceFile::new("a.go", "one\ntwo\nthree".to_string());
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.line(1), Some("one"));
        assert_eq!(file.line(3), Some("three"));
        assert_eq!(file.line(4), None);
    }

    #[test]
    fn test_trailing_newline_opens_empty_line() {
        let file = SourceFile::new("a.go", "one\ntwo\n".to_string());
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.line(3), Some(""));
    }

    #[test]
    fn test_lines_between_is_verbatim() {
        let text = "package main\n\nfunc f() {\n\treturn\n}\n";
        let file = SourceFile::new("a.go", text.to_string());
        assert_eq!(file.lines_between(3, 5), Some("func f() {\n\treturn\n}"));
        assert_eq!(file.lines_between(5, 3), None);
        assert_eq!(file.lines_between(0, 1), None);
    }

    #[test]
    fn test_crlf_kept() {
        let file = SourceFile::new("a.go", "a\r\nb\r\n".to_string());
        assert_eq!(file.lines_between(1, 2), Some("a\r\nb\r"));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = SourceFile::from_bytes("a.go", b"package p\n\n// caf\xe9\n".to_vec()).unwrap_err();
        match err {
            ExtractError::Parse(msg) => assert_eq!(msg, "a.go:3:7: illegal UTF-8 encoding"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_on_first_line() {
        let err = SourceFile::from_bytes("a.go", b"x\xffy".to_vec()).unwrap_err();
        assert_eq!(err.to_string(), "error parsing file: a.go:1:2: illegal UTF-8 encoding");
    }

    #[test]
    fn test_valid_utf8_kept() {
        let file = SourceFile::from_bytes("a.go", "// café\n".as_bytes().to_vec()).unwrap();
        assert_eq!(file.line(1), Some("// café"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SourceFile::load("/definitely/not/here.go").unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }
}
