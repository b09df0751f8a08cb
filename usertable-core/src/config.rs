//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::virtualize::RenderMode;

/// Number of records generated when the store is empty or unreadable.
pub const DEFAULT_ROW_COUNT: usize = 500;

/// Tunables for a table session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Size of a freshly generated dataset.
    pub row_count: usize,
    /// Lines per row.
    pub row_height: u16,
    /// Extra rows materialized above and below the viewport.
    pub overscan: usize,
    pub render_mode: RenderMode,
    /// Rows scrolled per wheel notch.
    pub scroll_step: u16,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_count: DEFAULT_ROW_COUNT,
            row_height: 1,
            overscan: 3,
            render_mode: RenderMode::Virtualized,
            scroll_step: 3,
        }
    }
}

impl TableConfig {
    /// Replace out-of-range values with usable ones.
    pub fn sanitized(self) -> Self {
        Self {
            row_height: self.row_height.max(1),
            scroll_step: self.scroll_step.max(1),
            ..self
        }
    }
}
