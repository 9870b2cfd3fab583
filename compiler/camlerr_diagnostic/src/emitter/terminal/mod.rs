//! Terminal Emitter
//!
//! Human-readable error panels with optional ANSI color support.
//!
//! ```text
//! ╭─ Error #1 in src/a.ml:3 ─────────────────────────
//! │ > 3 │ let x : int = "a"
//! │         ^^^
//! │ This expression has type string but ...
//! ╰──────────────────────────────────────────────────
//! ```

use std::io::{self, Write};

use crate::fragments::{fragments, Excerpt, Fragment};
use crate::span_utils::LineOffsetTable;
use crate::{BlockFailure, ByteRange, ParsedError};

use super::ErrorEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const TITLE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const EMPHASIS: &str = "\x1b[48;5;89m"; // Dark magenta background
    pub const RESET: &str = "\x1b[0m";
}

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A rendered line together with its printable width in characters.
struct Line {
    text: String,
    width: usize,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = text.chars().count();
        Line { text, width }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    width: usize,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the panel width in columns.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_WIDTH);
        self
    }

    /// Wrap `text` in `color` when colors are enabled.
    fn paint(&self, text: &str, color: &str) -> String {
        if self.colors && !text.is_empty() {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        let painted = self.paint(text, color);
        let _ = write!(self.writer, "{painted}");
    }

    fn write_panel(&mut self, title: &str, body: &[Line]) {
        let fill = self.width.saturating_sub(title.chars().count() + 4);
        let top = format!(
            "{}{} {}",
            self.paint("╭─ ", colors::DIM),
            self.paint(title, colors::TITLE),
            self.paint(&"─".repeat(fill), colors::DIM)
        );
        let bottom = self.paint(&format!("╰{}", "─".repeat(self.width - 1)), colors::DIM);
        let gutter = self.paint("│", colors::DIM);

        let _ = writeln!(self.writer, "{top}");
        for line in body {
            if line.width == 0 {
                let _ = writeln!(self.writer, "{gutter}");
            } else {
                let _ = writeln!(self.writer, "{gutter} {}", line.text);
            }
        }

        let _ = writeln!(self.writer, "{bottom}");
    }

    fn render(&self, error: &ParsedError) -> Vec<Line> {
        let mut out = Vec::new();
        for (i, fragment) in fragments(error).iter().enumerate() {
            if i > 0 {
                out.push(Line::plain(""));
            }
            match fragment {
                Fragment::Excerpt(excerpt) => out.extend(self.render_excerpt(excerpt)),
                Fragment::Text(text) => out.extend(text.lines().map(Line::plain)),
                Fragment::Notice { title, body } => {
                    out.push(Line {
                        text: self.paint(&format!("{title}:"), colors::ERROR),
                        width: title.chars().count() + 1,
                    });
                    for line in body.lines() {
                        out.push(Line {
                            text: format!("  {}", self.paint(line, colors::ERROR)),
                            width: line.chars().count() + 2,
                        });
                    }
                }
                Fragment::Columns {
                    left_title,
                    right_title,
                    rows,
                } => out.extend(self.render_columns(left_title, right_title, rows)),
            }
        }
        out
    }

    /// Line-numbered excerpt; emphasis is painted when colors are on and
    /// underlined with carets when they are off.
    fn render_excerpt(&self, excerpt: &Excerpt) -> Vec<Line> {
        let text = excerpt.text.as_str();
        let table = LineOffsetTable::build(text);
        let count = table.line_count();
        let first = excerpt.start_line as usize;
        let number_width = (first + count - 1).to_string().len();

        let mut out = Vec::with_capacity(count);
        for line in 1..=count {
            let Some(range) = table.line_range(text, line) else {
                continue;
            };
            let Some(source) = range.slice(text) else {
                continue;
            };
            let number = first + line - 1;
            let focused = excerpt
                .focus_line
                .is_some_and(|focus| focus as usize == number);
            let gutter = format!(
                "{} {number:>number_width$} │ ",
                if focused { ">" } else { " " }
            );
            let gutter_width = gutter.chars().count();
            let gutter = self.paint(&gutter, if focused { colors::BOLD } else { colors::DIM });

            let local = excerpt
                .emphasis
                .and_then(|emphasis| emphasis.intersect(range))
                .map(|hit| ByteRange::new(hit.start - range.start, hit.end - range.start));
            let width = gutter_width + source.chars().count();

            match local.and_then(|hit| split_at_range(source, hit)) {
                Some((before, mid, after)) => {
                    let body = format!("{before}{}{after}", self.paint(mid, colors::EMPHASIS));
                    out.push(Line {
                        text: format!("{gutter}{body}"),
                        width,
                    });
                    if !self.colors {
                        out.push(Line::plain(format!(
                            "{}{}",
                            " ".repeat(gutter_width + before.chars().count()),
                            "^".repeat(mid.chars().count())
                        )));
                    }
                }
                None => out.push(Line {
                    text: format!("{gutter}{source}"),
                    width,
                }),
            }
        }
        out
    }

    fn render_columns(
        &self,
        left_title: &str,
        right_title: &str,
        rows: &[(Excerpt, Excerpt)],
    ) -> Vec<Line> {
        let rendered: Vec<(Vec<Line>, Vec<Line>)> = rows
            .iter()
            .map(|(left, right)| (self.render_excerpt(left), self.render_excerpt(right)))
            .collect();

        let left_width = rendered
            .iter()
            .flat_map(|(left, _)| left.iter().map(|line| line.width))
            .chain(std::iter::once(left_title.chars().count()))
            .max()
            .unwrap_or(0);
        let right_width = rendered
            .iter()
            .flat_map(|(_, right)| right.iter().map(|line| line.width))
            .chain(std::iter::once(right_title.chars().count()))
            .max()
            .unwrap_or(0);
        let rule = format!(
            "{}┼{}",
            "─".repeat(left_width + 1),
            "─".repeat(right_width + 1)
        );

        let mut out = Vec::new();
        let title_pad = " ".repeat(left_width - left_title.chars().count());
        out.push(Line {
            text: format!(
                "{}{title_pad} │ {}",
                self.paint(left_title, colors::BOLD),
                self.paint(right_title, colors::BOLD)
            ),
            width: left_width + 3 + right_title.chars().count(),
        });

        for (left, right) in &rendered {
            out.push(Line {
                text: self.paint(&rule, colors::DIM),
                width: rule.chars().count(),
            });
            let height = left.len().max(right.len());
            for i in 0..height {
                let (left_text, left_len) = left
                    .get(i)
                    .map_or(("", 0), |line| (line.text.as_str(), line.width));
                let (right_text, right_len) = right
                    .get(i)
                    .map_or(("", 0), |line| (line.text.as_str(), line.width));
                let pad = " ".repeat(left_width - left_len);
                out.push(Line {
                    text: format!("{left_text}{pad} │ {right_text}"),
                    width: left_width + 3 + right_len,
                });
            }
        }
        out
    }
}

impl TerminalEmitter<io::Stdout> {
    /// Create a terminal emitter for stdout with explicit color mode.
    pub fn stdout(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Split `text` around `range`, if the range lands on character boundaries.
fn split_at_range(text: &str, range: ByteRange) -> Option<(&str, &str, &str)> {
    Some((
        text.get(..range.start)?,
        text.get(range.as_range())?,
        text.get(range.end..)?,
    ))
}

/// `[######------] completed/total`
fn progress_bar(total: usize, completed: usize) -> String {
    let filled = if total == 0 {
        BAR_WIDTH
    } else {
        completed.min(total) * BAR_WIDTH / total
    };
    format!(
        "[{}{}] {completed}/{total}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

impl<W: Write> ErrorEmitter for TerminalEmitter<W> {
    fn begin(&mut self, total: usize) {
        self.write_colored(&format!("Found {total} error{}", plural_s(total)), colors::BOLD);
        let _ = writeln!(self.writer);
    }

    fn progress(&mut self, total: usize, completed: usize) {
        let bar = progress_bar(total, completed);
        self.write_colored(&bar, colors::DIM);
        let _ = writeln!(self.writer);
    }

    fn emit(&mut self, index: usize, error: &ParsedError) {
        let body = self.render(error);
        self.write_panel(&error.title(index), &body);
    }

    fn emit_failure(&mut self, failure: &BlockFailure) {
        self.write_colored("warning", colors::WARNING);
        let _ = write!(self.writer, ": block #{}", failure.index + 1);
        if let Some(location) = &failure.location {
            let _ = write!(self.writer, " ({location})");
        }
        let _ = writeln!(self.writer, " skipped: {}", failure.error);
    }

    fn finish(&mut self, total: usize, failed: usize) {
        if failed == 0 {
            return;
        }
        self.write_colored("warning", colors::WARNING);
        let _ = writeln!(
            self.writer,
            ": {failed} of {total} block{} could not be parsed",
            plural_s(total)
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
