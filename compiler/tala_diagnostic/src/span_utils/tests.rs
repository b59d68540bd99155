use super::*;

#[test]
fn test_line_lookup() {
    let source = "line1\nline2\nline3";
    let table = LineOffsetTable::build(source);

    assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
    assert_eq!(table.offset_to_line_col(source, 8), (2, 3));
    assert_eq!(table.offset_to_line_col(source, 12), (3, 1));
    assert_eq!(table.line_count(), 3);
}

#[test]
fn test_columns_count_characters() {
    let source = "string s = 'é';\nx";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes; the `;` after the closing quote is character 15.
    let semi = u32::try_from(source.find(';').unwrap_or(0)).unwrap_or(0);
    assert_eq!(table.offset_to_line_col(source, semi), (1, 15));
}

#[test]
fn test_line_text() {
    let source = "number x = 1;\r\nprint(x);\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), "number x = 1;");
    assert_eq!(table.line_text(source, 2), "print(x);");
    assert_eq!(table.line_text(source, 3), "");
    assert_eq!(table.line_text(source, 9), "");
}

#[test]
fn test_offset_past_end() {
    let source = "ab";
    assert_eq!(span_start_line_col(source, Span::new(10, 12)), (1, 3));
}
