//! Error Emitters
//!
//! Provides different output formats for parsed errors:
//! - Terminal: bordered panels, code excerpts, side-by-side mismatch tables
//! - JSON: Machine-readable output for tooling
//!
//! Each emitter implements the `ErrorEmitter` trait; the pipeline drives it
//! and never touches process-wide output itself.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::{BlockFailure, ParsedError};

/// Returns a trailing comma for JSON list serialization.
///
/// Returns `","` when `index` is not the last element, `""` otherwise.
pub(crate) fn trailing_comma(index: usize, total: usize) -> &'static str {
    if index + 1 < total {
        ","
    } else {
        ""
    }
}

/// Trait for rendering parsed errors.
pub trait ErrorEmitter {
    /// Called once before any error, with the number of blocks found.
    fn begin(&mut self, total: usize);

    /// Called before each block is handed over; `completed` is 1-based.
    fn progress(&mut self, total: usize, completed: usize);

    /// Emit one parsed error; `index` is its zero-based stream position.
    fn emit(&mut self, index: usize, error: &ParsedError);

    /// Report a block that failed to parse and was skipped.
    fn emit_failure(&mut self, failure: &BlockFailure);

    /// Called once after the last block.
    fn finish(&mut self, total: usize, failed: usize);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
