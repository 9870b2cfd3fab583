//! Conversion of a parsed error into an ordered list of render fragments.
//!
//! Emitters that draw rich output walk the fragments in order; every
//! fragment depends only on the parsed record, so this is a pure function.

use crate::{Backtrace, ByteRange, ErrorKind, Location, ParsedError};

/// Column titles for implementation/interface pairs.
const IMPLEMENTATION_TITLE: &str = "implementation";
const INTERFACE_TITLE: &str = "expected by interface";
const ACTUAL_TYPE_TITLE: &str = "actual type";
const EXPECTED_TYPE_TITLE: &str = "expected type";
const ADDITIONAL_ERROR_TITLE: &str = "Additional error";

/// A line-numbered code excerpt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Excerpt {
    /// Number shown next to the first line.
    pub start_line: u32,
    pub text: String,
    /// Byte range of `text` to emphasize.
    pub emphasis: Option<ByteRange>,
    /// Line number to draw attention to.
    pub focus_line: Option<u32>,
}

impl Excerpt {
    pub fn new(start_line: u32, text: impl Into<String>) -> Self {
        Excerpt {
            start_line,
            text: text.into(),
            emphasis: None,
            focus_line: None,
        }
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: Option<ByteRange>) -> Self {
        self.emphasis = emphasis;
        self
    }
}

/// One renderable piece of an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Source excerpt echoed by the compiler.
    Excerpt(Excerpt),
    /// Free text.
    Text(String),
    /// A titled, bordered block of text.
    Notice { title: String, body: String },
    /// Excerpts side by side under two column titles.
    Columns {
        left_title: String,
        right_title: String,
        rows: Vec<(Excerpt, Excerpt)>,
    },
}

/// Fragments for `error`, in display order.
pub fn fragments(error: &ParsedError) -> Vec<Fragment> {
    let mut out = Vec::new();

    if let Some(excerpt) = snippet_excerpt(error) {
        out.push(Fragment::Excerpt(excerpt));
    }

    match &error.kind {
        ErrorKind::Plain { text } => out.push(Fragment::Text(text.clone())),
        ErrorKind::ExpressionMismatch { summary, backtrace } => {
            out.push(Fragment::Text(summary.clone()));
            push_backtrace(
                &mut out,
                backtrace,
                ACTUAL_TYPE_TITLE.to_string(),
                EXPECTED_TYPE_TITLE.to_string(),
                (1, 1),
            );
        }
        ErrorKind::InterfaceMismatch {
            summary,
            actual,
            expected,
            backtrace,
        } => {
            out.push(Fragment::Text(summary.clone()));
            push_backtrace(
                &mut out,
                backtrace,
                column_title(IMPLEMENTATION_TITLE, actual.as_ref()),
                column_title(INTERFACE_TITLE, expected.as_ref()),
                (start_line(actual.as_ref()), start_line(expected.as_ref())),
            );
        }
    }

    out
}

/// The echoed snippet, with the marker moved into whole-excerpt offsets.
fn snippet_excerpt(error: &ParsedError) -> Option<Excerpt> {
    let first = error.snippet.first()?;
    let mut text = String::new();
    let mut last_start = 0;
    for (i, line) in error.snippet.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        last_start = text.len();
        text.push_str(&line.text);
    }
    Some(Excerpt {
        start_line: first.line_number,
        emphasis: error.marker.map(|m| m.shifted(last_start)),
        focus_line: error.focus_line(),
        text,
    })
}

fn push_backtrace(
    out: &mut Vec<Fragment>,
    backtrace: &Backtrace,
    left_title: String,
    right_title: String,
    (left_line, right_line): (u32, u32),
) {
    if let Some(additional) = &backtrace.additional_error {
        out.push(Fragment::Notice {
            title: ADDITIONAL_ERROR_TITLE.to_string(),
            body: additional.clone(),
        });
    }
    if backtrace.frames.is_empty() {
        return;
    }
    let rows = backtrace
        .frames
        .iter()
        .map(|frame| {
            (
                Excerpt::new(left_line, frame.implementation.as_str())
                    .with_emphasis(frame.highlight_impl),
                Excerpt::new(right_line, frame.interface.as_str())
                    .with_emphasis(frame.highlight_intf),
            )
        })
        .collect();
    out.push(Fragment::Columns {
        left_title,
        right_title,
        rows,
    });
}

fn column_title(title: &str, location: Option<&Location>) -> String {
    match location {
        Some(loc) => format!("{title} ({loc})"),
        None => title.to_string(),
    }
}

fn start_line(location: Option<&Location>) -> u32 {
    location.map_or(1, |loc| loc.start_line)
}
