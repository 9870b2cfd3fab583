//! Structured parsing of OCaml type-checker diagnostics.
//!
//! The compiler prints errors as plain text: a location line, an echoed
//! source excerpt with caret markers, and an `Error:` body that for type
//! mismatches nests "implementation vs. interface" levels several deep.
//! This crate turns that text into [`ParsedError`] records and ships two
//! emitters that render them.
//!
//! # Pipeline
//!
//! ```text
//! stdin text
//!     │
//!     ▼
//! split_blocks() ──► ErrorBlock (one per `File "..."` line)
//!     │
//!     ▼
//! parse_block() ──► location + snippet + marker + error body
//!     │
//!     ▼
//! classify() ──► Plain | ExpressionMismatch | InterfaceMismatch
//!     │                       │
//!     │                       ▼
//!     │               parse_backtrace() ──► root-first Frames
//!     ▼
//! ErrorEmitter (terminal, JSON)
//! ```
//!
//! Every phrase the parsers look for lives in a [`Dialect`], so a change in
//! compiler wording is a table update rather than a code change.

pub mod backtrace;
pub mod body;
pub mod classify;
pub mod dialect;
pub mod emitter;
mod error;
pub mod fragments;
pub mod location;
mod parsed;
pub mod pipeline;
pub mod span_utils;
pub mod split;

pub use backtrace::{parse_backtrace, Backtrace, Frame};
pub use body::parse_block;
pub use classify::classify;
pub use dialect::Dialect;
pub use emitter::{ColorMode, ErrorEmitter, JsonEmitter, TerminalEmitter};
pub use error::ParseError;
pub use location::{parse_location, KeepPath, Location, PathNormalizer, RelativeTo};
pub use parsed::{ErrorKind, ParsedError, SnippetLine};
pub use pipeline::{BlockFailure, FailurePolicy, Outcome, Pipeline};
pub use span_utils::ByteRange;
pub use split::{split_blocks, ErrorBlock};
