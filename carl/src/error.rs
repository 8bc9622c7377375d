//! Error handling.

use std::io;

/// Type alias for `Result` with the crate's default `Error`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that are raised by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document failed to parse. Carries the line-annotated failure.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The given text is not a valid IRI.
    #[error("invalid IRI: {0}")]
    InvalidIri(String),
    /// A prefixed name used a namespace that was never declared.
    #[error("unknown prefix: {0}")]
    InvalidPrefix(String),
    /// Error reading input or writing output.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A parse failure, optionally annotated with the 1-based source line on which
/// it occurred. Mirrors `carl`'s `ParseException`.
#[derive(Debug, thiserror::Error)]
pub struct ParseError {
    message: String,
    line: Option<u32>,
}

impl ParseError {
    /// Build an error with no line information.
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            line: None,
        }
    }

    /// Build an error annotated with the source line it occurred on.
    pub fn at(message: impl Into<String>, line: u32) -> Self {
        ParseError {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Attach a line number to an error that doesn't have one yet.
    pub fn with_line(mut self, line: u32) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    /// The 1-based source line this error occurred on, if known.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The bare message, without the `parse error...` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "parse error at line {}: {}", line, self.message),
            None => write!(f, "parse error: {}", self.message),
        }
    }
}
