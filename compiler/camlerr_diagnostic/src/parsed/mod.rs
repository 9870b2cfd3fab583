//! Structured error records handed to emitters.

use crate::{Backtrace, ByteRange, Location};

/// One echoed source line: `<number> | <text>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnippetLine {
    pub line_number: u32,
    pub text: String,
}

/// Semantic shape of an error body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Anything without further structure; the body verbatim.
    Plain { text: String },
    /// `This expression has type ... but an expression was expected of type ...`
    ExpressionMismatch { summary: String, backtrace: Backtrace },
    /// `The implementation ... does not match the interface ...`
    InterfaceMismatch {
        summary: String,
        /// Where the implementation declares the item.
        actual: Option<Location>,
        /// Where the interface expects it.
        expected: Option<Location>,
        backtrace: Backtrace,
    },
}

impl ErrorKind {
    /// Short stable name, used in JSON output and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Plain { .. } => "plain",
            ErrorKind::ExpressionMismatch { .. } => "expression_mismatch",
            ErrorKind::InterfaceMismatch { .. } => "interface_mismatch",
        }
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            ErrorKind::Plain { .. } => None,
            ErrorKind::ExpressionMismatch { backtrace, .. }
            | ErrorKind::InterfaceMismatch { backtrace, .. } => Some(backtrace),
        }
    }
}

/// One fully parsed error block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedError {
    pub location: Location,
    pub snippet: Vec<SnippetLine>,
    /// Caret-marked byte range within the last snippet line.
    pub marker: Option<ByteRange>,
    pub kind: ErrorKind,
}

impl ParsedError {
    /// Panel title for the error at `index` in the stream.
    pub fn title(&self, index: usize) -> String {
        format!("Error #{} in {}", index + 1, self.location)
    }

    /// Line number of the last snippet line, which carries the marker.
    pub fn focus_line(&self) -> Option<u32> {
        self.snippet.last().map(|l| l.line_number)
    }
}
