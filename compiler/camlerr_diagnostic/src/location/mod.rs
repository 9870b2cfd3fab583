//! Location lines.
//!
//! Every error block opens with one of:
//!
//! ```text
//! File "src/a.ml", line 3, characters 8-11:
//! File "src/a.ml", lines 3-5, characters 2-10:
//! File "src/a.ml", lines 3-5:
//! File "src/a.ml", line 1:
//! ```
//!
//! Interface mismatch bodies embed indented references of the same shape
//! with a trailing label (`Expected declaration`, `Actual declaration`).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Dialect, ParseError};

/// A normalized reference into source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    /// Path, already normalized by a [`PathNormalizer`].
    pub path: String,
    /// First line (1-based).
    pub start_line: u32,
    /// Last line; equal to `start_line` when no range was given.
    pub end_line: u32,
    /// Character range on the first line, when present.
    pub characters: Option<(u32, u32)>,
    /// Text after the final colon of an embedded reference.
    pub label: Option<String>,
}

impl Location {
    /// Whether the location spans more than one line.
    pub fn is_multiline(&self) -> bool {
        self.end_line != self.start_line
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.start_line)
    }
}

/// Rewrites paths printed by the compiler before they are stored.
pub trait PathNormalizer {
    fn normalize(&self, path: &str) -> String;
}

/// Keeps paths exactly as printed.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepPath;

impl PathNormalizer for KeepPath {
    fn normalize(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Makes paths relative to a base directory (usually the working directory).
#[derive(Clone, Debug)]
pub struct RelativeTo {
    base: PathBuf,
}

impl RelativeTo {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        RelativeTo { base: base.into() }
    }

    /// Relative to the process working directory.
    pub fn current_dir() -> std::io::Result<Self> {
        std::env::current_dir().map(RelativeTo::new)
    }
}

impl PathNormalizer for RelativeTo {
    fn normalize(&self, path: &str) -> String {
        let p = Path::new(path);
        if p.is_absolute() {
            match p.strip_prefix(&self.base) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
                _ => path.to_string(),
            }
        } else {
            path.strip_prefix("./").unwrap_or(path).to_string()
        }
    }
}

/// Parse a location line (block start or embedded reference).
pub fn parse_location(
    line: &str,
    dialect: &Dialect,
    paths: &dyn PathNormalizer,
) -> Result<Location, ParseError> {
    let malformed = |reason| ParseError::MalformedLocationLine {
        line: line.to_string(),
        reason,
    };

    let rest = line
        .trim()
        .strip_prefix(dialect.location_prefix)
        .ok_or_else(|| malformed("missing `File \"` prefix"))?;
    let (path, rest) = rest
        .split_once('"')
        .ok_or_else(|| malformed("unterminated path"))?;
    let (fields, label) = rest
        .split_once(':')
        .ok_or_else(|| malformed("missing trailing colon"))?;

    let fields: Vec<&str> = fields.split(',').map(str::trim).collect();
    let (lines, characters) = match fields.as_slice() {
        ["", lines] => (*lines, None),
        ["", lines, characters] => (*lines, Some(*characters)),
        _ => return Err(malformed("expected 2 or 3 comma-separated fields")),
    };

    let (start_line, end_line) = if let Some(range) = lines.strip_prefix("lines ") {
        parse_range(range).ok_or_else(|| malformed("invalid line range"))?
    } else if let Some(number) = lines.strip_prefix("line ") {
        let n = number
            .trim()
            .parse()
            .map_err(|_| malformed("invalid line number"))?;
        (n, n)
    } else {
        return Err(malformed("missing `line`/`lines` keyword"));
    };
    if end_line < start_line {
        return Err(malformed("line range ends before it starts"));
    }

    let characters = match characters {
        Some(field) => {
            let range = field
                .strip_prefix("characters ")
                .ok_or_else(|| malformed("missing `characters` keyword"))?;
            Some(parse_range(range).ok_or_else(|| malformed("invalid character range"))?)
        }
        None => None,
    };

    let label = label.trim();
    Ok(Location {
        path: paths.normalize(path),
        start_line,
        end_line,
        characters,
        label: (!label.is_empty()).then(|| label.to_string()),
    })
}

/// Parse `N-M`.
fn parse_range(text: &str) -> Option<(u32, u32)> {
    let (start, end) = text.trim().split_once('-')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}
