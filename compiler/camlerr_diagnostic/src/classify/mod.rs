//! Choosing the semantic shape of an error body.

use tracing::trace;

use crate::location::parse_location;
use crate::{parse_backtrace, Dialect, ErrorKind, ParseError, PathNormalizer};

/// Classify an error body.
///
/// `error_line` is the line starting with `Error:`; `rest` holds every
/// following line of the block.
pub fn classify(
    error_line: &str,
    rest: &[&str],
    dialect: &Dialect,
    paths: &dyn PathNormalizer,
) -> Result<ErrorKind, ParseError> {
    let description = error_line
        .strip_prefix(dialect.error_prefix)
        .unwrap_or(error_line)
        .trim();

    if description.starts_with(dialect.expression_mismatch_prefix) {
        trace!("expression mismatch");
        let mut lines = Vec::with_capacity(rest.len() + 1);
        lines.push(description);
        lines.extend_from_slice(rest);
        let backtrace = parse_backtrace(&lines, dialect)?;
        return Ok(ErrorKind::ExpressionMismatch {
            summary: description.to_string(),
            backtrace,
        });
    }

    if description.starts_with(dialect.interface_mismatch_prefix) {
        trace!("interface mismatch");
        return interface_mismatch(description, rest, dialect, paths);
    }

    let mut text = error_line.to_string();
    for line in rest {
        text.push('\n');
        text.push_str(line);
    }
    Ok(ErrorKind::Plain {
        text: text.trim_end().to_string(),
    })
}

/// An interface mismatch body:
///
/// ```text
/// Error: The implementation foo.ml
///        does not match the interface foo.cmi:
///        Values do not match: ...
///        File "foo.mli", line 1, characters 0-14: Expected declaration
///        File "foo.ml", line 1, characters 4-5: Actual declaration
/// ```
///
/// The description runs up to the first line ending its sentence with `:`.
/// Text between the description and the first boundary is context
/// (`In module M:`) and is not part of any frame. The first embedded
/// reference ends the backtrace.
fn interface_mismatch(
    description: &str,
    rest: &[&str],
    dialect: &Dialect,
    paths: &dyn PathNormalizer,
) -> Result<ErrorKind, ParseError> {
    let mut summary = description.to_string();
    let mut consumed = 0;
    if !description.contains(':') {
        for line in rest {
            consumed += 1;
            summary.push(' ');
            summary.push_str(line.trim());
            if line.contains(':') {
                break;
            }
        }
    }
    let rest = &rest[consumed..];

    let body_end = rest
        .iter()
        .position(|line| dialect.is_reference(line))
        .unwrap_or(rest.len());
    let (body, references) = rest.split_at(body_end);

    let first_boundary = body
        .iter()
        .position(|line| dialect.is_boundary(line))
        .unwrap_or(body.len());
    if first_boundary > 0 {
        trace!(lines = first_boundary, "skipping context before first mismatch");
    }
    let backtrace = parse_backtrace(&body[first_boundary..], dialect)?;

    let mut locations = references
        .iter()
        .filter(|line| dialect.is_reference(line))
        .map(|line| parse_location(line, dialect, paths));
    let expected = locations.next().transpose()?;
    let actual = locations.next().transpose()?;

    Ok(ErrorKind::InterfaceMismatch {
        summary,
        actual,
        expected,
        backtrace,
    })
}
