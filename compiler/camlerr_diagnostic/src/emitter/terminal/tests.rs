use super::*;
use crate::{Backtrace, Dialect, ErrorKind, Frame, KeepPath, Location, ParseError, Pipeline};

const MISMATCH: &str = "\
File \"a.ml\", line 1, characters 14-17:
1 | let x : int = \"a\"
                  ^^^
Error: This expression has type string but an expression was expected of type int
";

fn parsed(input: &str) -> Vec<ParsedError> {
    let dialect = Dialect::default();
    Pipeline::new(&dialect, &KeepPath).parse_all(input).unwrap()
}

fn render(colors: ColorMode, error: &ParsedError) -> String {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, colors, false);
    emitter.emit(0, error);
    emitter.flush();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_panel_without_color() {
    let errors = parsed(MISMATCH);
    let text = render(ColorMode::Never, &errors[0]);

    assert!(!text.contains("\x1b["), "unexpected ANSI codes:\n{text}");
    assert!(text.starts_with("╭─ Error #1 in a.ml:1 ─"), "got:\n{text}");
    assert!(text.contains("│ > 1 │ let x : int = \"a\"\n"), "got:\n{text}");
    // Carets sit under the marked text when colors are off.
    assert!(
        text.contains(&format!("│ {}^^^\n", " ".repeat(20))),
        "got:\n{text}"
    );
    assert!(text.contains("│ This expression has type string"));
    assert!(text.contains("│ actual type  │ expected type"), "got:\n{text}");
    assert!(text.contains("│   1 │ string │   1 │ int"), "got:\n{text}");
    assert!(text.trim_end().ends_with(&"─".repeat(10)));
}

#[test]
fn test_panel_with_color_paints_emphasis() {
    let errors = parsed(MISMATCH);
    let text = render(ColorMode::Always, &errors[0]);

    assert!(text.contains("\x1b["));
    assert!(text.contains(&format!("{}\"a\"{}", colors::EMPHASIS, colors::RESET)));
    assert!(!text.contains("^^^"));
}

#[test]
fn test_interface_mismatch_columns_and_notice() {
    let location = |path: &str, line| Location {
        path: path.to_string(),
        start_line: line,
        end_line: line,
        characters: None,
        label: None,
    };
    let mut inner = Frame::new("val x : t", "val x : u");
    inner.highlight_impl = Some(ByteRange::new(4, 5));
    let error = ParsedError {
        location: location("foo.ml", 1),
        snippet: vec![],
        marker: None,
        kind: ErrorKind::InterfaceMismatch {
            summary: "The implementation foo.ml does not match the interface foo.cmi:"
                .to_string(),
            actual: Some(location("foo.ml", 12)),
            expected: Some(location("foo.mli", 3)),
            backtrace: Backtrace {
                frames: vec![Frame::new("t", "u"), inner],
                additional_error: Some("The type constructor t would escape its scope".to_string()),
            },
        },
    };

    let text = render(ColorMode::Never, &error);
    assert!(text.contains("│ Additional error:\n"), "got:\n{text}");
    assert!(text.contains("│   The type constructor t would escape its scope\n"));
    assert!(
        text.contains("implementation (foo.ml:12)"),
        "got:\n{text}"
    );
    assert!(text.contains("expected by interface (foo.mli:3)"));
    assert!(text.contains("12 │ val x : t"), "got:\n{text}");
    assert!(text.contains("3 │ val x : u"), "got:\n{text}");
    assert!(text.contains("┼"));
}

#[test]
fn test_multiline_snippet_numbers_are_aligned() {
    let errors = parsed(
        "\
File \"b.ml\", lines 9-10, characters 2-5:
9 | let f () =
10 |   g 1 2
       ^^^
Error: This function is applied to too many arguments
",
    );
    let text = render(ColorMode::Never, &errors[0]);
    assert!(text.contains("│    9 │ let f () =\n"), "got:\n{text}");
    assert!(text.contains("│ > 10 │   g 1 2\n"), "got:\n{text}");
}

#[test]
fn test_begin_and_progress() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

    emitter.begin(1);
    emitter.begin(4);
    emitter.progress(4, 2);
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Found 1 error\n"));
    assert!(text.contains("Found 4 errors\n"));
    assert!(text.contains(&format!(
        "[{}{}] 2/4",
        "#".repeat(15),
        "-".repeat(15)
    )));
}

#[test]
fn test_progress_bar_bounds() {
    assert_eq!(progress_bar(3, 0), format!("[{}] 0/3", "-".repeat(BAR_WIDTH)));
    assert_eq!(progress_bar(3, 3), format!("[{}] 3/3", "#".repeat(BAR_WIDTH)));
    assert_eq!(progress_bar(0, 0), format!("[{}] 0/0", "#".repeat(BAR_WIDTH)));
}

#[test]
fn test_failure_and_summary() {
    let mut output = Vec::new();
    let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);

    emitter.emit_failure(&BlockFailure {
        index: 1,
        location: Some(Location {
            path: "b.ml".to_string(),
            start_line: 2,
            end_line: 2,
            characters: None,
            label: None,
        }),
        error: ParseError::UnexpectedLineInBlock {
            line: "junk".to_string(),
        },
    });
    emitter.finish(3, 1);
    emitter.finish(3, 0);
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    assert!(
        text.starts_with("warning: block #2 (b.ml:2) skipped: "),
        "got:\n{text}"
    );
    assert!(text.contains("junk"));
    assert!(text.ends_with("warning: 1 of 3 blocks could not be parsed\n"));
}

#[test]
fn test_width_is_clamped() {
    let errors = parsed(MISMATCH);
    let mut output = Vec::new();
    let mut emitter =
        TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false).with_width(10);
    emitter.emit(0, &errors[0]);
    emitter.flush();

    let text = String::from_utf8(output).unwrap();
    let bottom = text.lines().last().unwrap();
    assert_eq!(bottom, format!("╰{}", "─".repeat(MIN_WIDTH - 1)));
}

// --- ColorMode Tests ---

#[test]
fn test_color_mode_auto_with_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
}

#[test]
fn test_color_mode_auto_without_tty() {
    assert!(!ColorMode::Auto.should_use_colors(false));
}

#[test]
fn test_color_mode_always_ignores_tty() {
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(true));
}

#[test]
fn test_color_mode_never_ignores_tty() {
    assert!(!ColorMode::Never.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_color_mode_default_is_auto() {
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}
