use usertable_term::{Buffer, Cell, Rgb, Style};

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.width())
        .filter_map(|x| buf.get(x, y))
        .filter(|cell| !cell.wide_continuation)
        .map(|cell| cell.char)
        .collect()
}

#[test]
fn test_get_out_of_bounds() {
    let buf = Buffer::new(4, 2);
    assert!(buf.get(3, 1).is_some());
    assert!(buf.get(4, 0).is_none());
    assert!(buf.get(0, 2).is_none());
}

#[test]
fn test_set_ignores_out_of_bounds() {
    let mut buf = Buffer::new(2, 2);
    buf.set(5, 5, Cell::new('x'));
    assert_eq!(row(&buf, 0), "  ");
}

// ============================================================================
// set_str
// ============================================================================

#[test]
fn test_set_str_writes_styled_text() {
    let mut buf = Buffer::new(10, 1);
    let style = Style::new().fg(Rgb::new(1, 2, 3)).bold();

    assert_eq!(buf.set_str(2, 0, "abc", 10, style), 3);
    assert_eq!(row(&buf, 0), "  abc     ");
    let cell = buf.get(2, 0).unwrap();
    assert_eq!(cell.fg, Rgb::new(1, 2, 3));
    assert!(cell.style.bold);
}

#[test]
fn test_set_str_stops_at_max_width_and_edge() {
    let mut buf = Buffer::new(6, 1);
    assert_eq!(buf.set_str(0, 0, "abcdef", 3, Style::new()), 3);
    assert_eq!(row(&buf, 0), "abc   ");

    assert_eq!(buf.set_str(4, 0, "xyz", 10, Style::new()), 2);
    assert_eq!(row(&buf, 0), "abc xy");
}

#[test]
fn test_set_str_wide_chars() {
    let mut buf = Buffer::new(5, 1);
    assert_eq!(buf.set_str(0, 0, "日本語", 5, Style::new()), 5);

    assert!(buf.get(1, 0).unwrap().wide_continuation);
    // The third character does not fit in the last column.
    assert_eq!(buf.get(4, 0).unwrap().char, ' ');
    assert_eq!(row(&buf, 0), "日本 ");
}

#[test]
fn test_set_str_outside_rows() {
    let mut buf = Buffer::new(5, 1);
    assert_eq!(buf.set_str(0, 3, "abc", 5, Style::new()), 0);
    assert_eq!(buf.set_str(9, 0, "abc", 5, Style::new()), 0);
}

#[test]
fn test_fill() {
    let mut buf = Buffer::new(5, 1);
    let style = Style::new().bg(Rgb::new(9, 9, 9));
    buf.fill(1, 0, 10, style);

    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::BLACK);
    assert!((1..5).all(|x| buf.get(x, 0).unwrap().bg == Rgb::new(9, 9, 9)));
}

// ============================================================================
// diff
// ============================================================================

#[test]
fn test_diff_reports_changed_cells() {
    let previous = Buffer::new(4, 2);
    let mut current = Buffer::new(4, 2);
    current.set(1, 1, Cell::new('x'));
    current.set(3, 0, Cell::new('y'));

    let changed: Vec<(u16, u16, char)> = current
        .diff(&previous)
        .map(|(x, y, cell)| (x, y, cell.char))
        .collect();
    assert_eq!(changed, vec![(3, 0, 'y'), (1, 1, 'x')]);
}

#[test]
fn test_clear_resets_cells() {
    let mut buf = Buffer::new(3, 1);
    buf.set_str(0, 0, "abc", 3, Style::new());
    buf.clear();
    assert_eq!(buf.diff(&Buffer::new(3, 1)).count(), 0);
}

#[test]
fn test_style_attributes_reach_cells() {
    let mut buf = Buffer::new(4, 1);
    let style = Style::new().bold().underline();
    buf.set_str(0, 0, "ab", 4, style);

    let cell = buf.get(1, 0).unwrap();
    assert!(cell.style.bold);
    assert!(cell.style.underline);
    assert!(!cell.style.dim);
    assert!(!buf.get(2, 0).unwrap().style.underline);
}
