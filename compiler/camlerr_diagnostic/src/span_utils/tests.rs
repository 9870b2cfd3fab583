use super::*;

#[test]
fn test_byte_range_basics() {
    let r = ByteRange::new(2, 5);
    assert_eq!(r.len(), 3);
    assert!(!r.is_empty());
    assert!(r.fits("hello"));
    assert!(!r.fits("hey"));
    assert_eq!(r.slice("hello world"), Some("llo"));
    assert_eq!(r.shifted(10), ByteRange::new(12, 15));
    assert_eq!(ByteRange::from(1..4), ByteRange::new(1, 4));
}

#[test]
fn test_byte_range_slice_rejects_non_char_boundary() {
    let text = "αβ";
    assert_eq!(ByteRange::new(0, 2).slice(text), Some("α"));
    assert_eq!(ByteRange::new(1, 2).slice(text), None);
}

#[test]
fn test_byte_range_intersect() {
    let a = ByteRange::new(0, 10);
    assert_eq!(a.intersect(ByteRange::new(5, 15)), Some(ByteRange::new(5, 10)));
    assert_eq!(a.intersect(ByteRange::new(10, 15)), None);
    assert_eq!(a.intersect(ByteRange::new(2, 3)), Some(ByteRange::new(2, 3)));
}

#[test]
fn test_floor_char_boundary() {
    let text = "aβc";
    assert_eq!(floor_char_boundary(text, 0), 0);
    assert_eq!(floor_char_boundary(text, 2), 1);
    assert_eq!(floor_char_boundary(text, 3), 3);
    assert_eq!(floor_char_boundary(text, 99), 4);
}

#[test]
fn test_line_from_offset_multiple_lines() {
    let text = "line1\nline2\nline3";
    assert_eq!(line_from_offset(text, 0), 1); // 'l' of line1
    assert_eq!(line_from_offset(text, 5), 1); // '\n' after line1
    assert_eq!(line_from_offset(text, 6), 2); // 'l' of line2
    assert_eq!(line_from_offset(text, 12), 3); // 'l' of line3
    assert_eq!(line_from_offset(text, 100), 3);
}

#[test]
fn test_offset_to_line_col() {
    let text = "abc\ndefgh\nij";
    assert_eq!(offset_to_line_col(text, 0), (1, 1)); // 'a'
    assert_eq!(offset_to_line_col(text, 2), (1, 3)); // 'c'
    assert_eq!(offset_to_line_col(text, 4), (2, 1)); // 'd'
    assert_eq!(offset_to_line_col(text, 7), (2, 4)); // 'g'
    assert_eq!(offset_to_line_col(text, 10), (3, 1)); // 'i'
}

#[test]
fn test_offset_to_line_col_empty() {
    assert_eq!(offset_to_line_col("", 0), (1, 1));
}

#[test]
fn test_offset_to_line_col_unicode() {
    let text = "αβγ\nδε";
    assert_eq!(offset_to_line_col(text, 2), (1, 2)); // 'β'
    assert_eq!(offset_to_line_col(text, 4), (1, 3)); // 'γ'
    assert_eq!(offset_to_line_col(text, 7), (2, 1)); // 'δ'
}

#[test]
fn test_range_to_line_cols_spanning_lines() {
    let text = "type t =\n  int";
    let start = text.find('t').unwrap_or_default();
    let range = ByteRange::new(start, text.len());
    assert_eq!(range_to_line_cols(text, range), ((1, 1), (2, 6)));
}

#[test]
fn test_line_offset_table_agrees_with_scan() {
    let text = "abc\ndefgh\n\nij";
    let table = LineOffsetTable::build(text);
    assert_eq!(table.line_count(), 4);
    for offset in 0..=text.len() {
        assert_eq!(
            table.offset_to_line_col(text, offset),
            offset_to_line_col(text, offset),
            "offset {offset}"
        );
    }
}

#[test]
fn test_line_offset_table_line_range() {
    let text = "line1\nline2\n";
    let table = LineOffsetTable::build(text);
    assert_eq!(table.line_range(text, 1), Some(ByteRange::new(0, 5)));
    assert_eq!(table.line_range(text, 2), Some(ByteRange::new(6, 11)));
    assert_eq!(table.line_range(text, 3), Some(ByteRange::new(12, 12)));
    assert_eq!(table.line_range(text, 4), None);
    assert_eq!(table.line_range(text, 0), None);
}
