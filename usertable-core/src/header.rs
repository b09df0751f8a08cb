//! Header row: cell geometry, hit regions and pointer intents.
//!
//! Each header cell is split into a grip handle and a label. The two regions
//! never overlap, so a press on the handle can only start a drag and a click on
//! the label can only toggle sort.

use log::trace;

use crate::columns::ColumnKey;
use crate::drag::{DragOutcome, DragState};
use crate::geometry::{Point, Rect};
use crate::sort::{SortDirection, SortState};

/// Width of the grip handle at the left of every header cell.
pub const HANDLE_WIDTH: u16 = 2;

/// Glyph drawn in the handle.
pub const GRIP: char = '⋮';

/// Width of the separator at the right of every cell.
pub const SEPARATOR_WIDTH: u16 = 1;

/// Geometry of one header cell on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: ColumnKey,
    /// Visible part of the whole cell.
    pub area: Rect,
    /// Visible part of the grip handle. Empty when scrolled out.
    pub handle: Rect,
    /// Visible part of the label.
    pub label: Rect,
    /// Sort indicator, only set on the active sort column.
    pub indicator: Option<SortDirection>,
    /// Columns of the cell hidden to the left by horizontal scroll.
    pub clip_left: u16,
}

impl HeaderCell {
    /// Label text with the sort indicator appended.
    pub fn title(&self) -> String {
        match self.indicator {
            Some(direction) => format!("{} {}", self.key.label(), direction.glyph()),
            None => self.key.label().to_string(),
        }
    }
}

/// Which region of which header cell a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    Handle(ColumnKey),
    Label(ColumnKey),
}

/// Lay out header cells for `order` inside the header row `area`.
///
/// Cells are placed left to right at their fixed widths, shifted left by
/// `scroll_x`. Cells entirely outside the area are omitted.
pub fn layout_header(
    order: &[ColumnKey],
    sort: Option<SortState>,
    area: Rect,
    scroll_x: u16,
) -> Vec<HeaderCell> {
    if area.height == 0 {
        return Vec::new();
    }
    let view_start = u32::from(scroll_x);
    let view_end = view_start + u32::from(area.width);
    let mut cells = Vec::with_capacity(order.len());
    let mut start = 0u32;

    for &key in order {
        let end = start + u32::from(key.width());
        let cell_start = start;
        start = end;

        let Some(area_span) = clip(cell_start, end, view_start, view_end) else {
            continue;
        };
        let handle_end = (cell_start + u32::from(HANDLE_WIDTH)).min(end);
        let label_end = end.saturating_sub(u32::from(SEPARATOR_WIDTH)).max(handle_end);

        let to_rect = |span: Option<(u32, u32)>| match span {
            Some((from, to)) => Rect::new(
                area.x + (from - view_start) as u16,
                area.y,
                (to - from) as u16,
                area.height,
            ),
            None => Rect::new(area.x, area.y, 0, 0),
        };

        cells.push(HeaderCell {
            key,
            area: to_rect(Some(area_span)),
            handle: to_rect(clip(cell_start, handle_end, view_start, view_end)),
            label: to_rect(clip(handle_end, label_end, view_start, view_end)),
            indicator: sort.filter(|s| s.key == key).map(|s| s.direction),
            clip_left: (area_span.0 - cell_start) as u16,
        });
    }
    cells
}

/// Intersection of `[start, end)` with `[view_start, view_end)`.
fn clip(start: u32, end: u32, view_start: u32, view_end: u32) -> Option<(u32, u32)> {
    let from = start.max(view_start);
    let to = end.min(view_end);
    (from < to).then_some((from, to))
}

/// Find the handle or label under `at`.
pub fn hit_test(cells: &[HeaderCell], at: Point) -> Option<HeaderHit> {
    cells.iter().find_map(|cell| {
        if cell.handle.contains(at) {
            Some(HeaderHit::Handle(cell.key))
        } else if cell.label.contains(at) {
            Some(HeaderHit::Label(cell.key))
        } else {
            None
        }
    })
}

/// What a pointer event on the header asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderIntent {
    ToggleSort(ColumnKey),
    Reorder {
        dragged: ColumnKey,
        target: ColumnKey,
    },
    DragStarted(ColumnKey),
    DragMoved,
    DragCancelled(ColumnKey),
}

/// Turns raw pointer presses, moves and releases into header intents.
#[derive(Debug, Clone, Default)]
pub struct HeaderCoordinator {
    drag: DragState,
    pressed_label: Option<ColumnKey>,
}

impl HeaderCoordinator {
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Primary button pressed at `at`.
    pub fn pointer_down(&mut self, cells: &[HeaderCell], at: Point) -> Option<HeaderIntent> {
        self.pressed_label = None;
        match hit_test(cells, at)? {
            HeaderHit::Handle(key) => self
                .drag
                .begin(key, at)
                .then_some(HeaderIntent::DragStarted(key)),
            HeaderHit::Label(key) => {
                trace!("Label {} pressed", key);
                self.pressed_label = Some(key);
                None
            }
        }
    }

    /// Pointer moved with the primary button held.
    pub fn pointer_move(&mut self, at: Point) -> Option<HeaderIntent> {
        self.drag.update(at).then_some(HeaderIntent::DragMoved)
    }

    /// Primary button released at `at`.
    ///
    /// Ends an active drag with a closest-center drop, or completes a label
    /// click when the release lands on the label that was pressed.
    pub fn pointer_up(&mut self, cells: &[HeaderCell], at: Point) -> Option<HeaderIntent> {
        let pressed = self.pressed_label.take();

        if self.drag.is_dragging() {
            let targets = cells.iter().map(|cell| (cell.key, cell.area));
            return match self.drag.drop_at(at, targets)? {
                DragOutcome::Dropped { dragged, target } => {
                    Some(HeaderIntent::Reorder { dragged, target })
                }
                DragOutcome::Cancelled { dragged } => Some(HeaderIntent::DragCancelled(dragged)),
            };
        }

        match (pressed, hit_test(cells, at)) {
            (Some(pressed), Some(HeaderHit::Label(key))) if pressed == key => {
                Some(HeaderIntent::ToggleSort(key))
            }
            _ => None,
        }
    }

    /// Abort any gesture in progress.
    pub fn cancel(&mut self) -> Option<HeaderIntent> {
        self.pressed_label = None;
        self.drag
            .cancel()
            .map(|outcome| match outcome {
                DragOutcome::Cancelled { dragged } | DragOutcome::Dropped { dragged, .. } => {
                    HeaderIntent::DragCancelled(dragged)
                }
            })
    }

    /// Column a release right now would drop onto.
    pub fn drop_preview(&self, cells: &[HeaderCell]) -> Option<ColumnKey> {
        self.drag
            .hover_target(cells.iter().map(|cell| (cell.key, cell.area)))
    }
}
