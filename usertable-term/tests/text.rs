use usertable_term::text::{
    align_offset, char_width, display_width, fit, skip_columns, truncate_to_width,
};
use usertable_term::TextAlign;

#[test]
fn test_display_width_ascii() {
    assert_eq!(display_width("hello"), 5);
    assert_eq!(display_width(""), 0);
}

#[test]
fn test_display_width_mixed() {
    assert_eq!(display_width("Zürich"), 6);
    assert_eq!(display_width("a日b"), 4);
}

#[test]
fn test_char_width() {
    assert_eq!(char_width('a'), 1);
    assert_eq!(char_width('日'), 2);
    assert_eq!(char_width('▲'), 1);
}

#[test]
fn test_truncate_fits() {
    assert_eq!(truncate_to_width("hello", 10), "hello");
    assert_eq!(truncate_to_width("hello", 5), "hello");
}

#[test]
fn test_truncate_overflow() {
    assert_eq!(truncate_to_width("hello world", 8), "hello w…");
    assert_eq!(truncate_to_width("hello", 1), "…");
    assert_eq!(truncate_to_width("hello", 0), "");
}

#[test]
fn test_truncate_cjk() {
    assert_eq!(truncate_to_width("日本語", 5), "日本…");
}

#[test]
fn test_align_offset() {
    assert_eq!(align_offset(5, 10, TextAlign::Left), 0);
    assert_eq!(align_offset(4, 10, TextAlign::Center), 3);
    assert_eq!(align_offset(5, 10, TextAlign::Right), 5);
    assert_eq!(align_offset(15, 10, TextAlign::Right), 0);
}

// ============================================================================
// fit
// ============================================================================

#[test]
fn test_fit_pads_to_width() {
    assert_eq!(fit("abc", 6, TextAlign::Left), "abc   ");
    assert_eq!(fit("42", 5, TextAlign::Right), "   42");
    assert_eq!(fit("ab", 6, TextAlign::Center), "  ab  ");
}

#[test]
fn test_fit_truncates_overflow() {
    assert_eq!(fit("hello world", 6, TextAlign::Left), "hello…");
    assert_eq!(fit("hello world", 6, TextAlign::Right), "hello…");
}

#[test]
fn test_fit_exact_width_for_wide_text() {
    let fitted = fit("日本語テキスト", 7, TextAlign::Left);
    assert_eq!(display_width(&fitted), 7);
}

#[test]
fn test_fit_zero_width() {
    assert_eq!(fit("abc", 0, TextAlign::Left), "");
}

// ============================================================================
// skip_columns
// ============================================================================

#[test]
fn test_skip_columns() {
    assert_eq!(skip_columns("hello", 0), "hello");
    assert_eq!(skip_columns("hello", 2), "llo");
    assert_eq!(skip_columns("hello", 9), "");
}

#[test]
fn test_skip_columns_splits_wide_char() {
    assert_eq!(skip_columns("日本", 1), " 本");
    assert_eq!(skip_columns("日本", 2), "本");
}
