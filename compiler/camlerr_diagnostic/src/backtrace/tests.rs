use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse(text: &str) -> Result<Backtrace, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    parse_backtrace(&lines, &Dialect::default())
}

#[test]
fn test_single_expression_mismatch() {
    let bt = parse("This expression has type int but an expression was expected of type string")
        .unwrap();
    assert_eq!(
        bt,
        Backtrace {
            frames: vec![Frame::new("int", "string")],
            additional_error: None,
        }
    );
}

#[test]
fn test_two_line_expression_mismatch() {
    let bt = parse(
        "This expression has type int list\n       but an expression was expected of type string list",
    )
    .unwrap();
    assert_eq!(bt.frames, vec![Frame::new("int list", "string list")]);
}

#[test]
fn test_chunks_are_reversed() {
    let bt = parse(
        "\
This expression has type int list
       but an expression was expected of type string list
       Type int is not compatible with type string",
    )
    .unwrap();
    assert_eq!(
        bt.frames,
        vec![
            Frame::new("int", "string"),
            Frame::new("int list", "string list"),
        ]
    );
}

#[test]
fn test_values_do_not_match_chain() {
    let bt = parse(
        "\
       Values do not match:
         val f : int -> int
       is not included in
         val f : string -> int
       The type int -> int is not compatible with the type string -> int
       Type int is not compatible with type string",
    )
    .unwrap();
    assert_eq!(bt.frames.len(), 3);
    assert_eq!(bt.frames[0], Frame::new("int", "string"));
    assert_eq!(bt.frames[1].implementation, "int -> int");
    assert_eq!(bt.frames[1].interface, "string -> int");
    assert_eq!(bt.frames[2].implementation, "val f : int -> int");
    assert_eq!(bt.frames[2].interface, "val f : string -> int");
}

#[test]
fn test_method_sub_heading_is_dropped() {
    let bt = parse(
        "\
       The type < get : int > is not compatible with the type < get : string >
       Types for method get are incompatible",
    )
    .unwrap();
    assert_eq!(
        bt.frames,
        vec![Frame::new("< get : int >", "< get : string >")]
    );
}

#[test]
fn test_type_declarations_label_is_stripped() {
    let bt = parse(
        "\
       Type declarations do not match:
         type t = int
       is not included in
         type t = string",
    )
    .unwrap();
    assert_eq!(bt.frames, vec![Frame::new("type t = int", "type t = string")]);
}

#[test]
fn test_unrecognized_connective() {
    let err = parse("Values do not match: val x : int differs from val x : string").unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedConnective { .. }));
}

#[test]
fn test_empty_body_has_no_frames() {
    let bt = parse("").unwrap();
    assert!(bt.is_empty());
}

#[test]
fn test_scope_escape_becomes_additional_error() {
    let bt = parse(
        "\
       The type int is not compatible with the type string
       The type constructor t would escape its scope
       Type bool is not compatible with type unit",
    )
    .unwrap();
    assert_eq!(bt.frames.len(), 2);
    assert_eq!(bt.frames[0], Frame::new("bool", "unit"));
    assert_eq!(bt.frames[1], Frame::new("int", "string"));
    assert_eq!(
        bt.additional_error.as_deref(),
        Some("The type constructor t would escape its scope")
    );
}

#[test]
fn test_highlight_binding_name_in_next_frame() {
    // Emitted leaf-first; after reversal the `val x` frame comes first.
    let bt = parse(
        "\
       The type x is not compatible with the type y
       Values do not match: val x : int = 3 is not included in val x : string = 3",
    )
    .unwrap();
    assert_eq!(bt.frames[0].implementation, "val x : int = 3");
    assert_eq!(bt.frames[0].highlight_impl, None);
    assert_eq!(bt.frames[1].implementation, "x");
    assert_eq!(bt.frames[1].highlight_impl, Some(ByteRange::new(0, 1)));
    assert_eq!(bt.frames[1].highlight_intf, None);
}

#[test]
fn test_highlight_verbatim_head() {
    let mut frames = vec![
        Frame::new("type t = int", "type t = string"),
        Frame::new("sig type t = int end", "sig type t = string end"),
    ];
    link_frames(&mut frames);
    assert_eq!(frames[1].highlight_impl, Some(ByteRange::new(4, 10)));
    assert_eq!(frames[1].highlight_intf, Some(ByteRange::new(4, 10)));
}

#[test]
fn test_no_highlight_without_single_equals() {
    let mut frames = vec![
        Frame::new("val x : int", "val x : a = b = c"),
        Frame::new("val x : int", "val x : a"),
    ];
    link_frames(&mut frames);
    assert_eq!(frames[1].highlight_impl, None);
    assert_eq!(frames[1].highlight_intf, None);
}

#[test]
fn test_binding_head() {
    assert_eq!(binding_head("type t = int"), Some("type t"));
    assert_eq!(binding_head("  val x : int = 3  "), Some("val x : int"));
    assert_eq!(binding_head("int -> int"), None);
    assert_eq!(binding_head("a = b = c"), None);
    assert_eq!(binding_head(" = 3"), None);
}

#[test]
fn test_binding_name() {
    assert_eq!(binding_name("val x : int"), Some("x"));
    assert_eq!(binding_name("type 'a t"), Some("t"));
    assert_eq!(binding_name("type t"), Some("t"));
    assert_eq!(binding_name("val ( + ) : int"), None);
}

#[test]
fn test_cross_highlight_matches_whole_words_only() {
    assert_eq!(cross_highlight("val x : int = 3", "next x"), Some(ByteRange::new(5, 6)));
    assert_eq!(cross_highlight("val x : int = 3", "next"), None);
    assert_eq!(cross_highlight("type t = int", "t'"), None);
}

#[test]
fn test_split_chunks_counts_boundaries() {
    let lines = [
        "leading text",
        "Values do not match:",
        "  val x : int",
        "Type int",
        "Types for method m are incompatible",
    ];
    let chunks = split_chunks(&lines, &Dialect::default());
    assert_eq!(
        chunks,
        vec![
            "leading text\n".to_string(),
            "Values do not match:\n  val x : int\n".to_string(),
            "Type int\n".to_string(),
        ]
    );
}

#[test]
fn test_reversing_chunks_twice_is_identity() {
    let lines = ["Type a", "Type b", "The type c", "Values do not match: d"];
    let chunks = split_chunks(&lines, &Dialect::default());
    let mut reversed = chunks.clone();
    reversed.reverse();
    assert_ne!(reversed, chunks);
    reversed.reverse();
    assert_eq!(reversed, chunks);
}

fn type_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["int", "string", "bool", "unit", "t", "x", "'a list"])
        .prop_map(str::to_string)
}

#[derive(Clone, Debug)]
enum Level {
    Values(String, String),
    TheType(String, String),
    Type(String, String),
    Escape,
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![
        (type_name(), type_name()).prop_map(|(a, b)| Level::Values(a, b)),
        (type_name(), type_name()).prop_map(|(a, b)| Level::TheType(a, b)),
        (type_name(), type_name()).prop_map(|(a, b)| Level::Type(a, b)),
        Just(Level::Escape),
    ]
}

fn render_levels(levels: &[Level]) -> Vec<String> {
    let mut lines = Vec::new();
    for level in levels {
        match level {
            Level::Values(a, b) => {
                lines.push("       Values do not match:".to_string());
                lines.push(format!("         val v : {a} = 1"));
                lines.push("       is not included in".to_string());
                lines.push(format!("         val v : {b} = 1"));
            }
            Level::TheType(a, b) => lines.push(format!(
                "       The type {a} is not compatible with the type {b}"
            )),
            Level::Type(a, b) => {
                lines.push(format!("       Type {a} is not compatible with type {b}"));
            }
            Level::Escape => {
                lines.push("       The type constructor t would escape its scope".to_string());
            }
        }
    }
    lines
}

proptest! {
    #[test]
    fn prop_frame_count_is_boundaries_minus_escapes(
        levels in prop::collection::vec(level_strategy(), 0..8)
    ) {
        let lines = render_levels(&levels);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let bt = parse_backtrace(&refs, &Dialect::default()).unwrap();
        let escapes = levels.iter().filter(|l| matches!(l, Level::Escape)).count();
        prop_assert_eq!(bt.frames.len(), levels.len() - escapes);
        prop_assert_eq!(bt.additional_error.is_some(), escapes > 0);
    }

    #[test]
    fn prop_highlights_are_in_bounds(
        levels in prop::collection::vec(level_strategy(), 0..8)
    ) {
        let lines = render_levels(&levels);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let bt = parse_backtrace(&refs, &Dialect::default()).unwrap();
        for frame in &bt.frames {
            if let Some(r) = frame.highlight_impl {
                prop_assert!(r.fits(&frame.implementation));
                prop_assert!(r.slice(&frame.implementation).is_some());
            }
            if let Some(r) = frame.highlight_intf {
                prop_assert!(r.fits(&frame.interface));
                prop_assert!(r.slice(&frame.interface).is_some());
            }
        }
    }

    #[test]
    fn prop_first_frame_is_never_highlighted(
        levels in prop::collection::vec(level_strategy(), 1..8)
    ) {
        let lines = render_levels(&levels);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let bt = parse_backtrace(&refs, &Dialect::default()).unwrap();
        if let Some(first) = bt.frames.first() {
            prop_assert_eq!(first.highlight_impl, None);
            prop_assert_eq!(first.highlight_intf, None);
        }
    }
}
