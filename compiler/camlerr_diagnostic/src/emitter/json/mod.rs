//! JSON Emitter
//!
//! Machine-readable error output in JSON format. The whole run is one
//! array; skipped blocks appear in it as `"failed": true` objects.

use std::fmt::Write as _;
use std::io::Write;

use crate::{Backtrace, BlockFailure, ByteRange, ErrorKind, Location, ParsedError};

use super::{escape_json, trailing_comma, ErrorEmitter};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    fn separate(&mut self) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;
    }
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", escape_json(s))
}

fn optional_string(s: Option<&str>) -> String {
    s.map_or_else(|| "null".to_string(), quoted)
}

fn range_json(range: Option<ByteRange>) -> String {
    match range {
        Some(r) => format!("{{\"start\": {}, \"end\": {}}}", r.start, r.end),
        None => "null".to_string(),
    }
}

fn location_json(location: Option<&Location>) -> String {
    let Some(loc) = location else {
        return "null".to_string();
    };
    let characters = match loc.characters {
        Some((start, end)) => format!("[{start}, {end}]"),
        None => "null".to_string(),
    };
    format!(
        "{{\"path\": {}, \"start_line\": {}, \"end_line\": {}, \"characters\": {characters}, \"label\": {}}}",
        quoted(&loc.path),
        loc.start_line,
        loc.end_line,
        optional_string(loc.label.as_deref()),
    )
}

fn backtrace_json(backtrace: &Backtrace) -> String {
    let mut out = String::from("{\n      \"frames\": [\n");
    for (i, frame) in backtrace.frames.iter().enumerate() {
        let comma = trailing_comma(i, backtrace.frames.len());
        let _ = writeln!(
            out,
            "        {{\"implementation\": {}, \"interface\": {}, \"highlight_impl\": {}, \"highlight_intf\": {}}}{comma}",
            quoted(&frame.implementation),
            quoted(&frame.interface),
            range_json(frame.highlight_impl),
            range_json(frame.highlight_intf),
        );
    }
    let _ = write!(
        out,
        "      ],\n      \"additional_error\": {}\n    }}",
        optional_string(backtrace.additional_error.as_deref())
    );
    out
}

impl<W: Write> ErrorEmitter for JsonEmitter<W> {
    fn begin(&mut self, _total: usize) {
        let _ = writeln!(self.writer, "[");
    }

    fn progress(&mut self, _total: usize, _completed: usize) {
        // Progress is a terminal concern
    }

    fn emit(&mut self, index: usize, error: &ParsedError) {
        self.separate();

        // Build JSON manually (to avoid serde dependency)
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"index\": {index},");
        let _ = writeln!(self.writer, "    \"title\": {},", quoted(&error.title(index)));
        let _ = writeln!(
            self.writer,
            "    \"location\": {},",
            location_json(Some(&error.location))
        );

        let _ = writeln!(self.writer, "    \"snippet\": [");
        for (i, line) in error.snippet.iter().enumerate() {
            let comma = trailing_comma(i, error.snippet.len());
            let _ = writeln!(
                self.writer,
                "      {{\"line\": {}, \"text\": {}}}{comma}",
                line.line_number,
                quoted(&line.text)
            );
        }
        let _ = writeln!(self.writer, "    ],");
        let _ = writeln!(self.writer, "    \"marker\": {},", range_json(error.marker));
        let _ = writeln!(self.writer, "    \"kind\": \"{}\",", error.kind.name());

        match &error.kind {
            ErrorKind::Plain { text } => {
                let _ = writeln!(self.writer, "    \"text\": {}", quoted(text));
            }
            ErrorKind::ExpressionMismatch { summary, backtrace } => {
                let _ = writeln!(self.writer, "    \"summary\": {},", quoted(summary));
                let _ = writeln!(self.writer, "    \"backtrace\": {}", backtrace_json(backtrace));
            }
            ErrorKind::InterfaceMismatch {
                summary,
                actual,
                expected,
                backtrace,
            } => {
                let _ = writeln!(self.writer, "    \"summary\": {},", quoted(summary));
                let _ = writeln!(
                    self.writer,
                    "    \"actual\": {},",
                    location_json(actual.as_ref())
                );
                let _ = writeln!(
                    self.writer,
                    "    \"expected\": {},",
                    location_json(expected.as_ref())
                );
                let _ = writeln!(self.writer, "    \"backtrace\": {}", backtrace_json(backtrace));
            }
        }

        let _ = write!(self.writer, "  }}");
    }

    fn emit_failure(&mut self, failure: &BlockFailure) {
        self.separate();

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"index\": {},", failure.index);
        let _ = writeln!(self.writer, "    \"failed\": true,");
        let _ = writeln!(self.writer, "    \"kind\": \"{}\",", failure.error.kind());
        let _ = writeln!(
            self.writer,
            "    \"message\": {},",
            quoted(&failure.error.to_string())
        );
        let _ = writeln!(
            self.writer,
            "    \"location\": {}",
            location_json(failure.location.as_ref())
        );
        let _ = write!(self.writer, "  }}");
    }

    fn finish(&mut self, _total: usize, _failed: usize) {
        let _ = writeln!(self.writer, "\n]");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
