//! Compiler wording tables.
//!
//! The diagnostic grammar has no authoritative definition: every phrase
//! below was observed in real compiler output. Keeping them as data means a
//! new compiler release that rewords its errors only needs a new [`Dialect`]
//! value.

/// A versioned set of phrases that drive block splitting, classification,
/// and backtrace decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dialect {
    /// Name used to select the dialect from the command line.
    pub name: &'static str,
    /// Prefix of a location line (block start, or embedded reference).
    pub location_prefix: &'static str,
    /// Prefix of the line that opens the error body.
    pub error_prefix: &'static str,
    /// Description prefix of an expression type mismatch.
    pub expression_mismatch_prefix: &'static str,
    /// Description prefix of an implementation/interface mismatch.
    pub interface_mismatch_prefix: &'static str,
    /// A line containing any of these opens a new backtrace chunk.
    pub boundary_phrases: &'static [&'static str],
    /// A line starting with this word (as a heading) opens a new chunk.
    pub boundary_heading: &'static str,
    /// Lines containing any of these are dropped from the backtrace.
    pub skipped_phrases: &'static [&'static str],
    /// Phrases separating the two halves of a chunk, tried in order.
    pub connectives: &'static [&'static str],
    /// Labels stripped from the start of a chunk's left half, tried in order.
    pub frame_labels: &'static [&'static str],
    /// A chunk containing any of these is not a pairable mismatch.
    pub escape_phrases: &'static [&'static str],
}

/// Wording of the OCaml 4.x type checker.
pub const OCAML_4: Dialect = Dialect {
    name: "ocaml-4",
    location_prefix: "File \"",
    error_prefix: "Error:",
    expression_mismatch_prefix: "This expression has type",
    interface_mismatch_prefix: "The implementation",
    boundary_phrases: &["Values do not match:", "The type"],
    boundary_heading: "Type",
    skipped_phrases: &["Types for method"],
    connectives: &[
        "is not compatible with type",
        "is not compatible with the type",
        "is not included in",
        "but an expression was expected of type",
    ],
    frame_labels: &[
        "This expression has type",
        "Values do not match:",
        "Type declarations do not match:",
        "The type",
        "Type",
    ],
    escape_phrases: &["would escape its scope"],
};

/// All known dialects, newest first.
static DIALECTS: &[Dialect] = &[OCAML_4];

impl Default for Dialect {
    fn default() -> Self {
        OCAML_4
    }
}

impl Dialect {
    /// Look up a dialect by its name.
    pub fn by_name(name: &str) -> Option<&'static Dialect> {
        DIALECTS.iter().find(|d| d.name == name)
    }

    /// Names of every known dialect.
    pub fn names() -> impl Iterator<Item = &'static str> {
        DIALECTS.iter().map(|d| d.name)
    }

    /// Whether `line` opens a new error block.
    ///
    /// Only column-0 matches count; embedded references in interface
    /// mismatch bodies are indented.
    #[inline]
    pub fn is_block_start(&self, line: &str) -> bool {
        line.starts_with(self.location_prefix)
    }

    /// Whether `line` is an (indented) embedded location reference.
    #[inline]
    pub fn is_reference(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.location_prefix)
    }

    /// Whether `line` opens a new backtrace chunk.
    pub fn is_boundary(&self, line: &str) -> bool {
        if self.boundary_phrases.iter().any(|p| line.contains(p)) {
            return true;
        }
        let heading = line.trim_start();
        match heading.strip_prefix(self.boundary_heading) {
            Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
            None => false,
        }
    }

    /// Whether `line` is a sub-heading dropped from the backtrace.
    #[inline]
    pub fn is_skipped(&self, line: &str) -> bool {
        self.skipped_phrases.iter().any(|p| line.contains(p))
    }

    /// Whether `chunk` is a scope-escape notice rather than a mismatch.
    #[inline]
    pub fn is_escape(&self, chunk: &str) -> bool {
        self.escape_phrases.iter().any(|p| chunk.contains(p))
    }

    /// Find the first connective (in table order) present in `chunk`.
    ///
    /// Returns the byte offset of its first occurrence and the phrase.
    pub fn find_connective(&self, chunk: &str) -> Option<(usize, &'static str)> {
        self.connectives
            .iter()
            .find_map(|&phrase| chunk.find(phrase).map(|pos| (pos, phrase)))
    }

    /// Strip one leading frame label (and surrounding whitespace) from `text`.
    pub fn strip_label<'t>(&self, text: &'t str) -> &'t str {
        let text = text.trim_start();
        self.frame_labels
            .iter()
            .find_map(|label| text.strip_prefix(label))
            .unwrap_or(text)
            .trim()
    }
}
