use super::*;

#[test]
fn test_len_and_empty() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_inverted_span_has_no_length() {
    assert_eq!(Span::new(9, 3).len(), 0);
}

#[test]
fn test_display_and_range() {
    let span = Span::new(3, 7);
    assert_eq!(format!("{span}"), "3..7");
    assert_eq!(format!("{span:?}"), "3..7");
    assert_eq!(&"number x;"[span.to_range()], "ber ");
}
