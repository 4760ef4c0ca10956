//! Error type shared across the annotkit workspace.

use std::fmt;

/// Fatal error conditions for document processing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotError {
    /// I/O error reading or writing a file.
    Io(String),
    /// Error parsing PDF structure or syntax.
    Parse(String),
    /// A page index outside the document was requested.
    PageOutOfRange {
        /// The requested 0-based page index.
        index: usize,
        /// Number of pages in the document.
        page_count: usize,
    },
    /// A PDF object had an unexpected shape.
    Malformed(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for AnnotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotError::Io(msg) => write!(f, "I/O error: {msg}"),
            AnnotError::Parse(msg) => write!(f, "parse error: {msg}"),
            AnnotError::PageOutOfRange { index, page_count } => write!(
                f,
                "page {} is out of range (document has {page_count} pages)",
                index + 1
            ),
            AnnotError::Malformed(msg) => write!(f, "malformed object: {msg}"),
            AnnotError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AnnotError {}

impl From<std::io::Error> for AnnotError {
    fn from(err: std::io::Error) -> Self {
        AnnotError::Io(err.to_string())
    }
}
