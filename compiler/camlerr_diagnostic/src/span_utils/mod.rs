//! Byte range helpers and offset to line/column conversion.
//!
//! Highlights inside frames and snippets are stored as byte ranges into the
//! text they index. Renderers that work line by line convert them with the
//! functions here.
//!
//! ## Performance
//!
//! For repeated lookups on the same text, use [`LineOffsetTable`] which
//! pre-computes line offsets for O(log L) lookup instead of O(n) scanning.

use std::ops::Range;

/// Half-open byte range `[start, end)` into some text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Create a new range.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        ByteRange { start, end }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Whether the range is well-formed and lies within `text`.
    #[inline]
    pub fn fits(self, text: &str) -> bool {
        self.start <= self.end && self.end <= text.len()
    }

    /// The slice of `text` this range covers, if it is in bounds and on
    /// character boundaries.
    #[inline]
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.as_range())
    }

    /// Shift both ends by `delta` bytes.
    #[inline]
    pub const fn shifted(self, delta: usize) -> Self {
        ByteRange {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Intersection with `other`, or `None` if they don't overlap.
    pub fn intersect(self, other: ByteRange) -> Option<ByteRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(ByteRange { start, end })
    }

    #[inline]
    pub const fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for ByteRange {
    fn from(range: Range<usize>) -> Self {
        ByteRange::new(range.start, range.end)
    }
}

/// Largest character boundary of `text` that is `<= offset`.
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use camlerr_diagnostic::span_utils::LineOffsetTable;
///
/// let text = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(text);
///
/// assert_eq!(table.offset_to_line_col(text, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(text, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(text, 12), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Build a line offset table from text.
    pub fn build(text: &str) -> Self {
        let mut offsets = vec![0];
        for (i, byte) in text.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(exact) => exact + 1,
            Err(insert) => insert.max(1),
        }
    }

    /// 1-based (line, column) from a byte offset; the column counts
    /// characters, not bytes.
    pub fn offset_to_line_col(&self, text: &str, offset: usize) -> (usize, usize) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets.get(line - 1).copied().unwrap_or(0);
        let end = floor_char_boundary(text, offset).max(line_start);
        let col = text.get(line_start..end).map_or(0, |s| s.chars().count()) + 1;
        (line, col)
    }

    /// Byte range of a 1-based line, excluding its newline.
    pub fn line_range(&self, text: &str, line: usize) -> Option<ByteRange> {
        let start = *self.offsets.get(line.checked_sub(1)?)?;
        let end = self
            .offsets
            .get(line)
            .map_or(text.len(), |next| next.saturating_sub(1));
        Some(ByteRange::new(start, end.max(start)))
    }

    /// Number of lines in the text.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute 1-based line number from a byte offset.
///
/// Note: For repeated lookups, use [`LineOffsetTable`] instead.
pub fn line_from_offset(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Compute 1-based (line, column) from a byte offset.
///
/// The column is the number of characters (not bytes) from the start of
/// the line, plus one.
///
/// Note: For repeated lookups, use [`LineOffsetTable`] instead.
pub fn offset_to_line_col(text: &str, offset: usize) -> (usize, usize) {
    let end = floor_char_boundary(text, offset);
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

/// Start and end (line, column) positions of a byte range.
///
/// The end position is exclusive, like the range itself.
pub fn range_to_line_cols(text: &str, range: ByteRange) -> ((usize, usize), (usize, usize)) {
    (
        offset_to_line_col(text, range.start),
        offset_to_line_col(text, range.end),
    )
}

#[cfg(test)]
mod tests;
