//! Table session: the single owner of all table state.
//!
//! Records, sort state, column order and scroll position live here and are
//! only changed through the methods below. Derived state (row order and the
//! rendered body) is memoized and rebuilt only when its inputs change. Every
//! effective change raises the dirty flag the event loop redraws on.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::columns::{ColumnKey, ColumnOrder};
use crate::config::TableConfig;
use crate::geometry::{Point, Rect};
use crate::header::{HeaderCell, HeaderCoordinator, HeaderIntent, layout_header};
use crate::record::Record;
use crate::render::{RenderedBody, render_body};
use crate::sort::{SortState, sort_permutation, toggle_sort};
use crate::virtualize::{RenderMode, RowWindow, ScrollState, Viewport};

/// Memoized row order.
#[derive(Debug)]
struct OrderMemo {
    generation: u64,
    sort: Option<SortState>,
    permutation: Arc<[usize]>,
}

/// Inputs the rendered body depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BodyKey {
    sort_pass: usize,
    columns_revision: u64,
    /// `None` in full mode, where every row is built regardless of scroll.
    scroll_top: Option<u64>,
    viewport: Viewport,
    mode: RenderMode,
}

#[derive(Debug)]
pub struct TableSession {
    records: Arc<[Record]>,
    /// Bumped whenever the record snapshot is replaced.
    generation: u64,
    columns: ColumnOrder,
    sort: Option<SortState>,
    scroll: ScrollState,
    scroll_x: u16,
    viewport: Viewport,
    header_area: Rect,
    mode: RenderMode,
    overscan: usize,
    scroll_step: u16,
    focus: usize,
    header: HeaderCoordinator,
    order_memo: Option<OrderMemo>,
    body_memo: Option<(BodyKey, Arc<RenderedBody>)>,
    sort_passes: usize,
    render_passes: usize,
    dirty: bool,
}

impl TableSession {
    pub fn new(records: Vec<Record>, config: &TableConfig) -> Self {
        let config = config.sanitized();
        Self {
            records: records.into(),
            generation: 0,
            columns: ColumnOrder::default(),
            sort: None,
            scroll: ScrollState::default(),
            scroll_x: 0,
            viewport: Viewport::new(config.row_height, 0),
            header_area: Rect::default(),
            mode: config.render_mode,
            overscan: config.overscan,
            scroll_step: config.scroll_step,
            focus: 0,
            header: HeaderCoordinator::default(),
            order_memo: None,
            body_memo: None,
            sort_passes: 0,
            render_passes: 0,
            dirty: true,
        }
    }

    /// Use a different column order. The set of keys becomes fixed from here on.
    pub fn with_columns(mut self, columns: ColumnOrder) -> Self {
        self.columns = columns;
        self.focus = 0;
        self
    }

    // -------------------------------------------------------------------------
    // Records
    // -------------------------------------------------------------------------

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a new record snapshot. Sort state and column order are kept.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        info!("Replacing {} records with {}", self.records.len(), records.len());
        self.records = records.into();
        self.generation += 1;
        self.scroll = ScrollState::default();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Apply a header click on `key`.
    pub fn toggle_sort(&mut self, key: ColumnKey) -> SortState {
        let next = toggle_sort(self.sort, key);
        debug!("Sort set to {} {:?}", next.key, next.direction);
        self.sort = Some(next);
        self.dirty = true;
        next
    }

    /// Return to input order.
    pub fn clear_sort(&mut self) -> bool {
        if self.sort.take().is_none() {
            return false;
        }
        debug!("Sort cleared");
        self.dirty = true;
        true
    }

    /// Row order for the current records and sort state.
    ///
    /// Recomputed only when the snapshot or the sort state changed since the
    /// last call; `now` is only consulted on recomputation.
    pub fn row_order(&mut self, now: DateTime<Utc>) -> Arc<[usize]> {
        if let Some(memo) = &self.order_memo
            && memo.generation == self.generation
            && memo.sort == self.sort
        {
            return memo.permutation.clone();
        }

        self.sort_passes += 1;
        let permutation: Arc<[usize]> = sort_permutation(&self.records, self.sort, now).into();
        self.order_memo = Some(OrderMemo {
            generation: self.generation,
            sort: self.sort,
            permutation: permutation.clone(),
        });
        permutation
    }

    /// Records in derived order.
    pub fn sorted_records(&mut self, now: DateTime<Utc>) -> Vec<&Record> {
        let permutation = self.row_order(now);
        permutation.iter().map(|&i| &self.records[i]).collect()
    }

    /// Number of times the row order has been computed.
    pub fn sort_passes(&self) -> usize {
        self.sort_passes
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &ColumnOrder {
        &self.columns
    }

    /// Move `dragged` into the slot of `target`.
    pub fn reorder(&mut self, dragged: ColumnKey, target: ColumnKey) -> bool {
        let focused = self.focused_column();
        let changed = self.columns.reorder(dragged, target);
        if changed {
            self.refocus(focused);
            self.dirty = true;
        }
        changed
    }

    /// Move the focused column one or more slots left (negative) or right.
    pub fn move_focused(&mut self, delta: isize) -> bool {
        let Some(key) = self.focused_column() else {
            return false;
        };
        let changed = self.columns.shift(key, delta);
        if changed {
            self.refocus(Some(key));
            self.scroll_to_column(self.focus);
            self.dirty = true;
        }
        changed
    }

    pub fn focused_column(&self) -> Option<ColumnKey> {
        self.columns.get(self.focus)
    }

    /// Move keyboard focus across columns, wrapping around.
    pub fn focus_by(&mut self, delta: isize) {
        let len = self.columns.len();
        if len == 0 {
            return;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(len as isize) as usize;
        self.scroll_to_column(self.focus);
        self.dirty = true;
    }

    /// Toggle sort on the focused column.
    pub fn toggle_sort_focused(&mut self) -> Option<SortState> {
        let key = self.focused_column()?;
        Some(self.toggle_sort(key))
    }

    fn refocus(&mut self, key: Option<ColumnKey>) {
        if let Some(position) = key.and_then(|k| self.columns.position(k)) {
            self.focus = position;
        }
    }

    // -------------------------------------------------------------------------
    // Header
    // -------------------------------------------------------------------------

    /// Header cells as currently laid out.
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        layout_header(
            self.columns.keys(),
            self.sort,
            self.header_area,
            self.scroll_x,
        )
    }

    pub fn header(&self) -> &HeaderCoordinator {
        &self.header
    }

    /// Column the active drag would drop onto.
    pub fn drop_preview(&self) -> Option<ColumnKey> {
        self.header.drop_preview(&self.header_cells())
    }

    pub fn pointer_down(&mut self, at: Point) -> Option<HeaderIntent> {
        let cells = self.header_cells();
        let intent = self.header.pointer_down(&cells, at);
        self.apply(intent)
    }

    pub fn pointer_move(&mut self, at: Point) -> Option<HeaderIntent> {
        let intent = self.header.pointer_move(at);
        self.apply(intent)
    }

    pub fn pointer_up(&mut self, at: Point) -> Option<HeaderIntent> {
        let cells = self.header_cells();
        let intent = self.header.pointer_up(&cells, at);
        self.apply(intent)
    }

    /// Abort a drag in progress.
    pub fn cancel_drag(&mut self) -> Option<HeaderIntent> {
        let intent = self.header.cancel();
        self.apply(intent)
    }

    fn apply(&mut self, intent: Option<HeaderIntent>) -> Option<HeaderIntent> {
        match intent? {
            HeaderIntent::ToggleSort(key) => {
                if let Some(position) = self.columns.position(key) {
                    self.focus = position;
                }
                self.toggle_sort(key);
            }
            HeaderIntent::Reorder { dragged, target } => {
                self.reorder(dragged, target);
                // The drag highlight has to go even when the drop was a no-op.
                self.dirty = true;
            }
            HeaderIntent::DragStarted(_)
            | HeaderIntent::DragMoved
            | HeaderIntent::DragCancelled(_) => self.dirty = true,
        }
        intent
    }

    // -------------------------------------------------------------------------
    // Viewport and scrolling
    // -------------------------------------------------------------------------

    /// Place the header row and the body below it.
    ///
    /// Called by the painter every frame; does not mark the session dirty.
    pub fn set_layout(&mut self, header_area: Rect, body_height: u16) {
        self.header_area = header_area;
        self.viewport = Viewport::new(self.viewport.row_height, body_height);
        self.scroll.clamp(self.records.len(), self.viewport);
        self.clamp_scroll_x();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll.top()
    }

    pub fn scroll_x(&self) -> u16 {
        self.scroll_x
    }

    /// Scroll by whole rows.
    pub fn scroll_rows(&mut self, rows: i64) -> bool {
        let delta = rows.saturating_mul(i64::from(self.viewport.row_height));
        self.scroll_lines(delta)
    }

    /// Scroll by wheel notches.
    pub fn scroll_notches(&mut self, notches: i64) -> bool {
        self.scroll_rows(notches.saturating_mul(i64::from(self.scroll_step)))
    }

    /// Scroll by whole viewports.
    pub fn scroll_pages(&mut self, pages: i64) -> bool {
        let page = i64::from(self.viewport.height.max(self.viewport.row_height));
        self.scroll_lines(pages.saturating_mul(page))
    }

    fn scroll_lines(&mut self, delta: i64) -> bool {
        let changed = self
            .scroll
            .scroll_by(delta, self.records.len(), self.viewport);
        self.dirty |= changed;
        changed
    }

    /// Scroll to an absolute line offset.
    pub fn scroll_to(&mut self, top: u64) -> bool {
        let changed = self.scroll.scroll_to(top, self.records.len(), self.viewport);
        self.dirty |= changed;
        changed
    }

    pub fn scroll_to_end(&mut self) -> bool {
        self.scroll_to(u64::MAX)
    }

    /// Scroll horizontally by terminal columns.
    pub fn scroll_x_by(&mut self, delta: i32) -> bool {
        let previous = self.scroll_x;
        self.scroll_x = (i32::from(self.scroll_x) + delta).clamp(0, i32::from(u16::MAX)) as u16;
        self.clamp_scroll_x();
        let changed = self.scroll_x != previous;
        self.dirty |= changed;
        changed
    }

    fn max_scroll_x(&self) -> u16 {
        self.columns
            .total_width()
            .saturating_sub(self.header_area.width)
    }

    fn clamp_scroll_x(&mut self) {
        self.scroll_x = self.scroll_x.min(self.max_scroll_x());
    }

    /// Bring the column at `index` fully into view.
    fn scroll_to_column(&mut self, index: usize) {
        let Some(key) = self.columns.get(index) else {
            return;
        };
        let left = self.columns.offset_of(index);
        let right = left.saturating_add(key.width());
        let width = self.header_area.width;
        if width == 0 {
            return;
        }
        if left < self.scroll_x {
            self.scroll_x = left;
        } else if right > self.scroll_x.saturating_add(width) {
            self.scroll_x = right.saturating_sub(width);
        }
        self.clamp_scroll_x();
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        if self.mode != mode {
            info!("Render mode set to {}", mode.label());
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub fn toggle_render_mode(&mut self) -> RenderMode {
        self.set_render_mode(self.mode.toggled());
        self.mode
    }

    /// The materialized body for the current state.
    ///
    /// Rebuilt only when the row order, column order, viewport or render mode
    /// changed, or the scroll offset moved in virtualized mode. Row positions
    /// are content offsets; see [`crate::render::RenderedRow::offset`].
    pub fn body(&mut self, now: DateTime<Utc>) -> Arc<RenderedBody> {
        let permutation = self.row_order(now);
        let key = BodyKey {
            sort_pass: self.sort_passes,
            columns_revision: self.columns.revision(),
            scroll_top: match self.mode {
                RenderMode::Virtualized => Some(self.scroll.top()),
                RenderMode::Full => None,
            },
            viewport: self.viewport,
            mode: self.mode,
        };

        if let Some((cached_key, body)) = &self.body_memo
            && *cached_key == key
        {
            return body.clone();
        }

        let window = RowWindow::compute(
            self.mode,
            permutation.len(),
            self.scroll.top(),
            self.viewport,
            self.overscan,
        );
        let ordered: Vec<&Record> = permutation[window.range.clone()]
            .iter()
            .map(|&i| &self.records[i])
            .collect();
        let body = render_body(
            &ordered,
            self.columns.keys(),
            &window,
            self.viewport.row_height,
            now,
        );

        self.render_passes += 1;
        let body = Arc::new(body);
        self.body_memo = Some((key, body.clone()));
        body
    }

    /// Number of times the body has been materialized.
    pub fn render_passes(&self) -> usize {
        self.render_passes
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Request a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
