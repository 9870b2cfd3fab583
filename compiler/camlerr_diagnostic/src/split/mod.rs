//! Splitting a diagnostic stream into per-error blocks.

use tracing::trace;

use crate::{Dialect, ParseError};

/// The raw text of one diagnostic: its location line and everything up to
/// the next location line or end of input.
///
/// Borrowed straight from the input, so it is byte-identical to its source
/// slice (line terminators included).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorBlock<'src> {
    index: usize,
    text: &'src str,
}

impl<'src> ErrorBlock<'src> {
    /// Zero-based position of the block in the stream.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw text of the block.
    #[inline]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Lines of the block without their terminators.
    pub fn lines(&self) -> std::str::Lines<'src> {
        self.text.lines()
    }

    /// The opening location line.
    pub fn first_line(&self) -> Option<&'src str> {
        self.lines().next()
    }
}

/// Split `input` into blocks, one per column-0 location line.
///
/// Blank lines before the first block are ignored. Any other text there is
/// a [`ParseError::MalformedBlockStart`]: the stream cannot be trusted and
/// nothing is returned. Empty input yields no blocks.
pub fn split_blocks<'src>(
    input: &'src str,
    dialect: &Dialect,
) -> Result<Vec<ErrorBlock<'src>>, ParseError> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for (line_idx, line) in input.split_inclusive('\n').enumerate() {
        if dialect.is_block_start(line) {
            if let Some(s) = start {
                push_block(&mut blocks, &input[s..offset]);
            }
            start = Some(offset);
        } else if start.is_none() && !line.trim().is_empty() {
            return Err(ParseError::MalformedBlockStart {
                line_number: line_idx + 1,
                line: line.trim_end().to_string(),
            });
        }
        offset += line.len();
    }

    if let Some(s) = start {
        push_block(&mut blocks, &input[s..]);
    }

    trace!(count = blocks.len(), "split diagnostic stream");
    Ok(blocks)
}

fn push_block<'src>(blocks: &mut Vec<ErrorBlock<'src>>, text: &'src str) {
    blocks.push(ErrorBlock {
        index: blocks.len(),
        text,
    });
}
