//! Failure kinds raised while parsing compiler output.
//!
//! An empty input stream is not represented here: it is a normal outcome
//! (see [`crate::Outcome::NoErrors`]).

use thiserror::Error;

/// A lexical violation of the diagnostic grammar.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `File "..."` line whose comma-delimited fields don't match any
    /// known shape.
    #[error("malformed location line `{line}`: {reason}")]
    MalformedLocationLine { line: String, reason: &'static str },

    /// The first non-blank line of the stream is not a location line.
    #[error("expected a `File \"...\"` line at line {line_number}, found `{line}`")]
    MalformedBlockStart { line_number: usize, line: String },

    /// A line between the location and `Error:` that is neither a snippet
    /// line nor a caret marker.
    #[error("unexpected line in error block: `{line}`")]
    UnexpectedLineInBlock { line: String },

    /// A block that ends before any `Error:` line.
    #[error("error block at {location} has no `Error:` line")]
    MissingErrorLine { location: String },

    /// A mismatch chunk with none of the known connective phrases.
    #[error("could not split mismatch into implementation and interface: `{chunk}`")]
    UnrecognizedConnective { chunk: String },
}

impl ParseError {
    /// Short stable name of the failure kind, used in JSON output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MalformedLocationLine { .. } => "malformed_location_line",
            ParseError::MalformedBlockStart { .. } => "malformed_block_start",
            ParseError::UnexpectedLineInBlock { .. } => "unexpected_line_in_block",
            ParseError::MissingErrorLine { .. } => "missing_error_line",
            ParseError::UnrecognizedConnective { .. } => "unrecognized_connective",
        }
    }
}
