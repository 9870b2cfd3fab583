//! Parsing one error block.
//!
//! ```text
//! File "src/a.ml", line 3, characters 14-17:     <- location
//! 3 | let x : int = "a"                          <- snippet
//!                   ^^^                          <- marker
//! Error: This expression has type string ...     <- body
//! ```

use tracing::{debug, instrument};

use crate::location::parse_location;
use crate::span_utils::floor_char_boundary;
use crate::{
    classify, ByteRange, Dialect, ErrorBlock, ParseError, ParsedError, PathNormalizer, SnippetLine,
};

/// Width of the ` | ` separator after a snippet line number.
const GUTTER_EXTRA: usize = 3;

/// Parse one block into a [`ParsedError`].
#[instrument(level = "debug", skip_all, fields(index = block.index()))]
pub fn parse_block(
    block: &ErrorBlock<'_>,
    dialect: &Dialect,
    paths: &dyn PathNormalizer,
) -> Result<ParsedError, ParseError> {
    let mut lines = block.lines();
    let Some(first) = lines.next() else {
        return Err(ParseError::MalformedBlockStart {
            line_number: 1,
            line: String::new(),
        });
    };
    let location = parse_location(first, dialect, paths)?;

    let mut snippet = Vec::new();
    let mut last_label_len = 0;
    let mut marker_lines = Vec::new();

    while let Some(line) = lines.next() {
        if line.starts_with(dialect.error_prefix) {
            let rest: Vec<&str> = lines.by_ref().collect();
            let kind = classify(line, &rest, dialect, paths)?;
            let marker = snippet
                .last()
                .and_then(|last: &SnippetLine| marker_span(&marker_lines, last_label_len, &last.text));
            debug!(kind = kind.name(), snippet = snippet.len(), "parsed block");
            return Ok(ParsedError {
                location,
                snippet,
                marker,
                kind,
            });
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            let (label, line_number, text) = parse_snippet_line(line).ok_or_else(|| {
                ParseError::UnexpectedLineInBlock {
                    line: line.to_string(),
                }
            })?;
            last_label_len = label.len();
            snippet.push(SnippetLine {
                line_number,
                text: text.to_string(),
            });
        } else if line.contains('^') {
            marker_lines.push(line);
        } else {
            return Err(ParseError::UnexpectedLineInBlock {
                line: line.to_string(),
            });
        }
    }

    Err(ParseError::MissingErrorLine {
        location: location.to_string(),
    })
}

/// Split `<number> | <text>` into the label, its value, and the text.
fn parse_snippet_line(line: &str) -> Option<(&str, u32, &str)> {
    let (label, text) = line.split_once(" |")?;
    let line_number = label.trim_end().parse().ok()?;
    let text = text.strip_prefix(' ').unwrap_or(text);
    Some((label, line_number, text))
}

/// Convert caret positions into a byte range within the marked line.
///
/// Caret columns count from the start of the printed line, which begins
/// with the line number label and its separator; `label_len + 3` bytes are
/// subtracted to land in the source text. The result is clamped to `text`.
pub fn marker_span(marker_lines: &[&str], label_len: usize, text: &str) -> Option<ByteRange> {
    let (first, last) = marker_lines
        .iter()
        .flat_map(|line| line.match_indices('^').map(|(pos, _)| pos))
        .fold(None, |acc, pos| match acc {
            None => Some((pos, pos)),
            Some((lo, hi)) => Some((usize::min(lo, pos), usize::max(hi, pos))),
        })?;

    let offset = label_len + GUTTER_EXTRA;
    let start = floor_char_boundary(text, first.saturating_sub(offset));
    let end = floor_char_boundary(text, (last + 1).saturating_sub(offset));
    Some(ByteRange::new(start, end.max(start)))
}
