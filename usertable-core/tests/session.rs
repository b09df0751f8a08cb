use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use usertable_core::generate::generate_with;
use usertable_core::{
    ColumnKey, HeaderIntent, Point, Rect, Record, RenderMode, SortState, TableConfig,
    TableSession,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
}

fn records(count: usize) -> Vec<Record> {
    generate_with(&mut StdRng::seed_from_u64(7), count, now())
}

fn header_area() -> Rect {
    Rect::new(0, 2, 80, 1)
}

/// A session laid out with a 20 line body.
fn session(count: usize) -> TableSession {
    let mut session = TableSession::new(records(count), &TableConfig::default());
    session.set_layout(header_area(), 20);
    session
}

// ============================================================================
// Virtualized body
// ============================================================================

#[test]
fn test_body_materializes_only_visible_rows() {
    let mut session = session(500);
    let body = session.body(now());

    // 20 visible, one partial, three overscan below.
    assert_eq!(body.len(), 24);
    assert_eq!(body.rows[0].index, 0);
    assert_eq!(body.rows[0].offset(session.scroll_top()), 0);
    assert_eq!(body.total_height, 500);
}

#[test]
fn test_body_size_independent_of_dataset() {
    let mut small = session(500);
    let mut large = session(10_000);
    small.scroll_to(200);
    large.scroll_to(200);

    let small_body = small.body(now());
    let large_body = large.body(now());
    assert_eq!(small_body.len(), large_body.len());
    assert!(large_body.len() <= 20 + 1 + 2 * 3);
    assert_eq!(large_body.total_height, 10_000);
}

#[test]
fn test_body_rows_follow_scroll() {
    let mut session = session(500);
    session.scroll_to(10);
    let body = session.body(now());

    assert_eq!(body.rows[0].index, 7);
    assert_eq!(body.rows[0].top, 7);
    assert_eq!(body.rows[0].offset(10), -3);
    let visible: Vec<_> = body.rows.iter().filter(|row| row.offset(10) == 0).collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].index, 10);
}

#[test]
fn test_body_rows_keyed_by_record_id_in_sorted_order() {
    let mut session = session(50);
    session.toggle_sort(ColumnKey::Email);

    let expected: Vec<String> = session
        .sorted_records(now())
        .iter()
        .take(5)
        .map(|record| record.id.clone())
        .collect();
    let body = session.body(now());
    let keys: Vec<String> = body.rows.iter().take(5).map(|row| row.key.clone()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_cells_follow_column_order() {
    let mut session = session(5);
    let body = session.body(now());
    let first = &session.sorted_records(now())[0].clone();

    assert_eq!(body.rows[0].cells.len(), ColumnKey::DEFAULT_ORDER.len());
    assert_eq!(body.rows[0].cells[0], first.full_name());
    assert_eq!(body.rows[0].cells[1], first.email);
}

#[test]
fn test_full_mode_renders_every_row() {
    let mut session = session(500);
    session.set_render_mode(RenderMode::Full);
    assert_eq!(session.body(now()).len(), 500);

    assert_eq!(session.toggle_render_mode(), RenderMode::Virtualized);
    assert_eq!(session.body(now()).len(), 24);
}

#[test]
fn test_empty_dataset_renders_empty_body() {
    let mut session = session(0);
    let body = session.body(now());
    assert!(body.is_empty());
    assert_eq!(body.total_height, 0);
    assert!(!session.scroll_rows(5));

    session.set_render_mode(RenderMode::Full);
    assert!(session.body(now()).is_empty());
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_body_memoized_until_inputs_change() {
    let mut session = session(500);

    session.body(now());
    session.body(now());
    assert_eq!(session.render_passes(), 1);
    assert_eq!(session.sort_passes(), 1);

    session.scroll_rows(1);
    session.body(now());
    assert_eq!(session.render_passes(), 2);
    assert_eq!(session.sort_passes(), 1, "scrolling must not re-sort");

    session.toggle_sort(ColumnKey::Age);
    session.body(now());
    assert_eq!(session.render_passes(), 3);
    assert_eq!(session.sort_passes(), 2);
}

#[test]
fn test_full_mode_scroll_reuses_body() {
    let mut session = session(2_000);
    session.set_render_mode(RenderMode::Full);
    let before = session.body(now());

    assert!(session.scroll_rows(1));
    let after = session.body(now());
    assert_eq!(session.render_passes(), 1);
    assert_eq!(after.len(), 2_000);
    assert_eq!(after.rows[1].offset(session.scroll_top()), 0);
    assert_eq!(before, after);
}

#[test]
fn test_reorder_rerenders_without_resorting() {
    let mut session = session(100);
    session.toggle_sort(ColumnKey::City);
    session.body(now());

    assert!(session.reorder(ColumnKey::City, ColumnKey::FullName));
    let body = session.body(now());
    assert_eq!(session.sort_passes(), 1);
    assert_eq!(session.render_passes(), 2);
    assert_eq!(session.columns().keys()[0], ColumnKey::City);
    assert_eq!(
        body.rows[0].cells[0],
        session.sorted_records(now())[0].city.clone()
    );
}

#[test]
fn test_order_not_recomputed_for_new_time() {
    let mut session = session(20);
    session.toggle_sort(ColumnKey::Dsr);
    session.row_order(now());
    session.row_order(now() + Duration::days(3));
    assert_eq!(session.sort_passes(), 1);
}

#[test]
fn test_replace_records_resorts_and_resets_scroll() {
    let mut session = session(500);
    session.scroll_to(100);
    session.body(now());

    session.replace_records(records(30));
    assert_eq!(session.len(), 30);
    assert_eq!(session.scroll_top(), 0);
    session.body(now());
    assert_eq!(session.sort_passes(), 2);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_toggle_and_clear_sort() {
    let mut session = session(10);
    let input: Vec<String> = session.records().iter().map(|r| r.id.clone()).collect();

    assert_eq!(
        session.toggle_sort(ColumnKey::Id),
        SortState::ascending(ColumnKey::Id)
    );
    let mut sorted = input.clone();
    sorted.sort();
    let ids: Vec<String> = session
        .sorted_records(now())
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, sorted);

    assert!(session.clear_sort());
    assert!(!session.clear_sort());
    let ids: Vec<String> = session
        .sorted_records(now())
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, input);
}

#[test]
fn test_toggle_sort_focused() {
    let mut session = session(10);
    session.focus_by(1);
    assert_eq!(session.focused_column(), Some(ColumnKey::Email));
    assert_eq!(
        session.toggle_sort_focused(),
        Some(SortState::ascending(ColumnKey::Email))
    );
}

// ============================================================================
// Header pointer input
// ============================================================================

#[test]
fn test_label_click_sorts_and_focuses() {
    let mut session = session(10);

    assert_eq!(session.pointer_down(Point::new(30, 2)), None);
    assert_eq!(
        session.pointer_up(Point::new(30, 2)),
        Some(HeaderIntent::ToggleSort(ColumnKey::Email))
    );
    assert_eq!(session.sort(), Some(SortState::ascending(ColumnKey::Email)));
    assert_eq!(session.focused_column(), Some(ColumnKey::Email));

    session.pointer_down(Point::new(30, 2));
    session.pointer_up(Point::new(30, 2));
    assert_eq!(session.sort(), Some(SortState::descending(ColumnKey::Email)));
}

#[test]
fn test_handle_drag_reorders_without_sorting() {
    let mut session = session(10);

    assert_eq!(
        session.pointer_down(Point::new(0, 2)),
        Some(HeaderIntent::DragStarted(ColumnKey::FullName))
    );
    session.pointer_move(Point::new(40, 2));
    assert_eq!(session.drop_preview(), Some(ColumnKey::Email));
    assert_eq!(
        session.pointer_up(Point::new(40, 2)),
        Some(HeaderIntent::Reorder {
            dragged: ColumnKey::FullName,
            target: ColumnKey::Email,
        })
    );

    assert_eq!(session.sort(), None);
    assert_eq!(
        &session.columns().keys()[..3],
        &[ColumnKey::Email, ColumnKey::FullName, ColumnKey::Phone]
    );
    assert_eq!(session.columns().revision(), 1);
}

#[test]
fn test_drop_on_origin_keeps_order() {
    let mut session = session(10);
    session.pointer_down(Point::new(0, 2));
    session.pointer_up(Point::new(1, 2));

    assert_eq!(session.columns().keys(), &ColumnKey::DEFAULT_ORDER);
    assert_eq!(session.columns().revision(), 0);
}

#[test]
fn test_cancel_drag_leaves_columns() {
    let mut session = session(10);
    session.pointer_down(Point::new(0, 2));
    session.pointer_move(Point::new(60, 2));

    assert_eq!(
        session.cancel_drag(),
        Some(HeaderIntent::DragCancelled(ColumnKey::FullName))
    );
    assert_eq!(session.pointer_up(Point::new(60, 2)), None);
    assert_eq!(session.columns().keys(), &ColumnKey::DEFAULT_ORDER);
}

// ============================================================================
// Keyboard column control and scrolling
// ============================================================================

#[test]
fn test_focus_wraps() {
    let mut session = session(10);
    session.focus_by(-1);
    assert_eq!(session.focused_column(), Some(ColumnKey::Id));
    session.focus_by(1);
    assert_eq!(session.focused_column(), Some(ColumnKey::FullName));
}

#[test]
fn test_move_focused_keeps_focus_on_column() {
    let mut session = session(10);
    assert!(session.move_focused(1));
    assert_eq!(session.focused_column(), Some(ColumnKey::FullName));
    assert_eq!(session.columns().keys()[1], ColumnKey::FullName);
    assert!(session.move_focused(-1));
    assert!(!session.move_focused(-1));
    assert_eq!(session.columns().keys(), &ColumnKey::DEFAULT_ORDER);
}

#[test]
fn test_focus_scrolls_column_into_view() {
    let mut session = session(10);
    // Id is the last default column and starts past the 80 wide header.
    session.focus_by(-1);
    let cells = session.header_cells();
    let id = cells
        .iter()
        .find(|cell| cell.key == ColumnKey::Id)
        .map(|cell| cell.area);
    assert_eq!(id.map(|area| area.width), Some(ColumnKey::Id.width()));

    session.focus_by(1);
    assert_eq!(session.scroll_x(), 0);
}

#[test]
fn test_scroll_helpers_clamp() {
    let mut session = session(100);
    assert!(session.scroll_notches(2));
    assert_eq!(session.scroll_top(), 6);
    assert!(session.scroll_pages(1));
    assert_eq!(session.scroll_top(), 26);
    assert!(session.scroll_to_end());
    assert_eq!(session.scroll_top(), 80);
    assert!(!session.scroll_rows(1));
    assert!(session.scroll_to(0));
    assert!(!session.scroll_x_by(-5));
    assert!(session.scroll_x_by(5));
    assert_eq!(session.scroll_x(), 5);
}

#[test]
fn test_layout_change_reclamps_scroll() {
    let mut session = session(100);
    session.scroll_to_end();
    session.set_layout(header_area(), 40);
    assert_eq!(session.scroll_top(), 60);
}

#[test]
fn test_dirty_flag() {
    let mut session = session(100);
    assert!(session.take_dirty());
    assert!(!session.take_dirty());

    session.set_layout(header_area(), 20);
    assert!(!session.take_dirty());

    session.scroll_rows(1);
    assert!(session.take_dirty());

    session.scroll_to(1);
    assert!(!session.take_dirty());

    session.pointer_down(Point::new(0, 2));
    assert!(session.take_dirty());
}
