//! Decomposition of nested type mismatches.
//!
//! The type checker explains a mismatch as a list of levels, each naming
//! two types (or declarations) that failed to agree:
//!
//! ```text
//! Values do not match:
//!   val f : int -> int
//! is not included in
//!   val f : string -> int
//! The type int -> int is not compatible with the type string -> int
//! Type int is not compatible with type string
//! ```
//!
//! Each level becomes a [`Frame`] pairing the implementation side with the
//! interface side. Frames are ordered root-first, and when a frame's
//! predecessor is a single binding (`type t = int`), the place where that
//! binding's head reappears in the frame is recorded as a highlight so a
//! renderer can connect the two levels visually.
//!
//! # Algorithm
//!
//! 1. Chunk the lines at boundary phrases, dropping sub-headings.
//! 2. Reverse the chunks.
//! 3. Split each chunk at its connective and strip the leading label.
//! 4. Set aside scope-escape notices as the additional error.
//! 5. Compute cross-frame highlights.

use tracing::{debug, trace};

use crate::{ByteRange, Dialect, ParseError};

/// One paired mismatch level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub implementation: String,
    pub interface: String,
    /// Where the previous frame's binding reappears in `implementation`.
    pub highlight_impl: Option<ByteRange>,
    /// Where the previous frame's binding reappears in `interface`.
    pub highlight_intf: Option<ByteRange>,
}

impl Frame {
    pub fn new(implementation: impl Into<String>, interface: impl Into<String>) -> Self {
        Frame {
            implementation: implementation.into(),
            interface: interface.into(),
            highlight_impl: None,
            highlight_intf: None,
        }
    }
}

/// Root-first sequence of frames.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Backtrace {
    pub frames: Vec<Frame>,
    /// A notice present in the output that doesn't fit the frame shape,
    /// such as a type constructor escaping its scope.
    pub additional_error: Option<String>,
}

impl Backtrace {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.additional_error.is_none()
    }
}

/// Parse the lines of a mismatch body (after its leading description).
#[tracing::instrument(level = "trace", skip_all, fields(lines = lines.len()))]
pub fn parse_backtrace(lines: &[&str], dialect: &Dialect) -> Result<Backtrace, ParseError> {
    let mut chunks = split_chunks(lines, dialect);
    chunks.reverse();

    let mut backtrace = Backtrace::default();
    for chunk in &chunks {
        if dialect.is_escape(chunk) {
            debug!("scope escape notice set aside");
            backtrace.additional_error = Some(chunk.trim().to_string());
            continue;
        }
        backtrace.frames.push(pair_chunk(chunk, dialect)?);
    }

    link_frames(&mut backtrace.frames);
    trace!(frames = backtrace.frames.len(), "parsed backtrace");
    Ok(backtrace)
}

/// Group lines into chunks, each opened by a boundary line.
///
/// Lines before the first boundary form their own chunk. Chunks holding
/// only whitespace are dropped, so the result has one entry per boundary
/// plus one for non-blank leading text.
pub fn split_chunks(lines: &[&str], dialect: &Dialect) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for &line in lines {
        if dialect.is_skipped(line) {
            continue;
        }
        if dialect.is_boundary(line) {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    chunks.push(current);

    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

/// Split a chunk into a frame at its connective phrase.
fn pair_chunk(chunk: &str, dialect: &Dialect) -> Result<Frame, ParseError> {
    let Some((pos, phrase)) = dialect.find_connective(chunk) else {
        return Err(ParseError::UnrecognizedConnective {
            chunk: chunk.trim().to_string(),
        });
    };
    let left = dialect.strip_label(&chunk[..pos]);
    let right = chunk[pos + phrase.len()..].trim();
    Ok(Frame::new(left, right))
}

/// Fill in highlights for every frame after the first.
fn link_frames(frames: &mut [Frame]) {
    for i in 1..frames.len() {
        let highlight_impl =
            cross_highlight(&frames[i - 1].implementation, &frames[i].implementation);
        let highlight_intf = cross_highlight(&frames[i - 1].interface, &frames[i].interface);
        frames[i].highlight_impl = highlight_impl;
        frames[i].highlight_intf = highlight_intf;
    }
}

/// Locate the binding defined by `previous` inside `current`.
///
/// The verbatim head (text before the only `=`) is searched first. When it
/// doesn't appear, the bound name alone is searched as a whole word.
pub fn cross_highlight(previous: &str, current: &str) -> Option<ByteRange> {
    let head = binding_head(previous)?;
    if let Some(pos) = current.find(head) {
        return Some(ByteRange::new(pos, pos + head.len()));
    }
    let name = binding_name(head)?;
    if name == head {
        return None;
    }
    find_word(current, name)
}

/// Text before `=`, trimmed, when `text` contains exactly one `=`.
pub fn binding_head(text: &str) -> Option<&str> {
    let mut parts = text.split('=');
    let head = parts.next()?.trim();
    let _value = parts.next()?;
    if parts.next().is_some() || head.is_empty() {
        return None;
    }
    Some(head)
}

/// The identifier a binding head introduces: `val x : int` → `x`,
/// `type 'a t` → `t`.
pub fn binding_name(head: &str) -> Option<&str> {
    let before_annotation = head.split(':').next().unwrap_or(head);
    let name = before_annotation.split_whitespace().last()?;
    is_identifier(name).then_some(name)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn is_identifier(word: &str) -> bool {
    word.starts_with(|c: char| c.is_alphabetic() || c == '_') && word.chars().all(is_ident_char)
}

/// First occurrence of `word` in `text` not embedded in a longer identifier.
fn find_word(text: &str, word: &str) -> Option<ByteRange> {
    text.match_indices(word).find_map(|(pos, _)| {
        let end = pos + word.len();
        let before_ok = !text[..pos].chars().next_back().is_some_and(is_ident_char);
        let after_ok = !text[end..].chars().next().is_some_and(is_ident_char);
        (before_ok && after_ok).then_some(ByteRange::new(pos, end))
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
