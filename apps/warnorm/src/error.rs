//! Error types for parse calls.
//!
//! A parse call either succeeds with a complete `Issues` container or fails
//! with a [`ParseError`]. `Parsing` means the input could not be interpreted;
//! `Canceled` means the caller asked to stop and says nothing about the input.

use std::fmt;
use thiserror::Error;

/// Stage or cause of a parsing failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream could not be read (I/O, invalid UTF-8)
    Read,
    /// The tree document is malformed or misses required nodes
    Document,
    /// A result references a rule the document never defined
    UnknownRule,
    /// A line pattern failed to compile
    Pattern,
    /// A configured format is invalid
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Read => "read",
            ErrorKind::Document => "document",
            ErrorKind::UnknownRule => "unknown_rule",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The input could not be interpreted as valid tool output.
#[derive(Debug, Error)]
#[error("[{kind}] {}{message}", format_prefix(.format))]
pub struct ParsingError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub format: Option<String>,
    pub message: String,
}

fn format_prefix(format: &Option<String>) -> String {
    match format {
        Some(f) => format!("{}: ", f),
        None => String::new(),
    }
}

impl ParsingError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            format: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Tag the error with the id of the format that produced it.
    pub fn in_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn read(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Read, format!("cannot read input: {}", err)).with_source(err)
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Document, message)
    }

    pub fn unknown_rule(rule_id: &str) -> Self {
        Self::new(
            ErrorKind::UnknownRule,
            format!("result references undefined rule '{}'", rule_id),
        )
    }
}

impl From<roxmltree::Error> for ParsingError {
    fn from(err: roxmltree::Error) -> Self {
        ParsingError::document(format!("malformed XML: {}", err)).with_source(err)
    }
}

impl From<regex::Error> for ParsingError {
    fn from(err: regex::Error) -> Self {
        ParsingError::new(ErrorKind::Pattern, format!("invalid pattern: {}", err)).with_source(err)
    }
}

/// Cooperative abort requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parsing canceled")]
pub struct ParsingCanceled;

/// Outcome of a failed parse call.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    Canceled(#[from] ParsingCanceled),
}

impl ParseError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, ParseError::Canceled(_))
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ParseError::Parsing(e) => Some(e.kind),
            ParseError::Canceled(_) => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_display_with_and_without_format() {
        let err = ParsingError::document("missing root");
        assert_eq!(err.to_string(), "[document] missing root");
        let err = ParsingError::document("missing root").in_format("gendarme");
        assert_eq!(err.to_string(), "[document] gendarme: missing root");
    }

    #[test]
    fn test_read_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let err = ParsingError::read(io_err);
        assert_eq!(err.kind, ErrorKind::Read);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("truncated"));
    }

    #[test]
    fn test_unknown_rule_message() {
        let err = ParsingError::unknown_rule("R9");
        assert_eq!(err.kind, ErrorKind::UnknownRule);
        assert!(err.message.contains("R9"));
    }

    #[test]
    fn test_parse_error_distinguishes_cancel() {
        let canceled: ParseError = ParsingCanceled.into();
        assert!(canceled.is_canceled());
        assert_eq!(canceled.kind(), None);

        let failed: ParseError = ParsingError::document("x").into();
        assert!(!failed.is_canceled());
        assert_eq!(failed.kind(), Some(ErrorKind::Document));
    }

    #[test]
    fn test_from_roxmltree_error() {
        let xml_err = roxmltree::Document::parse("<a>").unwrap_err();
        let err: ParsingError = xml_err.into();
        assert_eq!(err.kind, ErrorKind::Document);
        assert!(err.message.contains("malformed XML"));
        assert!(err.source.is_some());
    }
}
