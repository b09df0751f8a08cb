//! Visible-range calculation for row virtualization.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Whether the body materializes only the visible window or every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Virtualized,
    Full,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Virtualized => RenderMode::Full,
            RenderMode::Full => RenderMode::Virtualized,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Virtualized => "virtualized",
            RenderMode::Full => "full",
        }
    }
}

/// Row geometry of the scrollable body, in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Height of every row. Always at least 1.
    pub row_height: u16,
    /// Height of the visible body.
    pub height: u16,
}

impl Viewport {
    pub fn new(row_height: u16, height: u16) -> Self {
        Self {
            row_height: row_height.max(1),
            height,
        }
    }

    /// Number of rows needed to cover the viewport, counting a partial last row.
    pub fn visible_rows(&self) -> usize {
        self.height.div_ceil(self.row_height) as usize
    }

    /// Height of `total` rows laid out end to end.
    pub fn content_height(&self, total: usize) -> u64 {
        total as u64 * u64::from(self.row_height)
    }

    /// Largest valid scroll offset for `total` rows.
    pub fn max_scroll(&self, total: usize) -> u64 {
        self.content_height(total)
            .saturating_sub(u64::from(self.height))
    }
}

/// Index range to materialize for the given scroll position.
///
/// Covers `[floor(scroll_top / h), floor(scroll_top / h) + ceil(viewport / h)]`
/// widened by `overscan` rows on both sides and clamped to `total`.
pub fn visible_range(
    total: usize,
    scroll_top: u64,
    row_height: u16,
    viewport_height: u16,
    overscan: usize,
) -> Range<usize> {
    if total == 0 || row_height == 0 || viewport_height == 0 {
        return 0..0;
    }
    let first = usize::try_from(scroll_top / u64::from(row_height)).unwrap_or(usize::MAX);
    let visible = viewport_height.div_ceil(row_height) as usize;
    let end = first
        .saturating_add(visible + 1)
        .saturating_add(overscan)
        .min(total);
    let start = first.saturating_sub(overscan).min(end);
    start..end
}

/// Vertical scroll offset in lines, kept within the content bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    top: u64,
}

impl ScrollState {
    pub fn top(&self) -> u64 {
        self.top
    }

    /// Scroll to an absolute offset. Returns whether the offset changed.
    pub fn scroll_to(&mut self, top: u64, total: usize, viewport: Viewport) -> bool {
        let clamped = top.min(viewport.max_scroll(total));
        if clamped == self.top {
            return false;
        }
        self.top = clamped;
        true
    }

    /// Scroll by a signed number of lines.
    pub fn scroll_by(&mut self, delta: i64, total: usize, viewport: Viewport) -> bool {
        let top = self.top.saturating_add_signed(delta);
        self.scroll_to(top, total, viewport)
    }

    /// Re-apply the bounds after the content or viewport changed.
    pub fn clamp(&mut self, total: usize, viewport: Viewport) -> bool {
        self.scroll_to(self.top, total, viewport)
    }
}

/// The rows a render pass materializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWindow {
    pub range: Range<usize>,
    pub total_height: u64,
}

impl RowWindow {
    /// Window for `total` rows under `mode`.
    pub fn compute(
        mode: RenderMode,
        total: usize,
        scroll_top: u64,
        viewport: Viewport,
        overscan: usize,
    ) -> Self {
        let range = match mode {
            RenderMode::Virtualized => visible_range(
                total,
                scroll_top,
                viewport.row_height,
                viewport.height,
                overscan,
            ),
            RenderMode::Full => 0..total,
        };
        Self {
            range,
            total_height: viewport.content_height(total),
        }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}
