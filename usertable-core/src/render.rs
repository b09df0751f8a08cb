//! Row materialization for the table body.

use chrono::{DateTime, Utc};

use crate::columns::ColumnKey;
use crate::record::Record;
use crate::virtualize::RowWindow;

/// One materialized row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Record id, stable across sorts and reorders.
    pub key: String,
    /// Position in the derived order.
    pub index: usize,
    /// Line offset from the top of the content.
    pub top: u64,
    /// Display text per column, in column order.
    pub cells: Vec<String>,
}

impl RenderedRow {
    /// Line offset from the top of the viewport. Negative above it.
    pub fn offset(&self, scroll_top: u64) -> i64 {
        self.top as i64 - scroll_top as i64
    }
}

/// The materialized body of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedBody {
    pub rows: Vec<RenderedRow>,
    /// Height of the full content, as if every row existed.
    pub total_height: u64,
}

impl RenderedBody {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Materialize the rows of `window`.
///
/// `records` holds exactly the rows of `window.range`, in derived order.
pub fn render_body(
    records: &[&Record],
    columns: &[ColumnKey],
    window: &RowWindow,
    row_height: u16,
    now: DateTime<Utc>,
) -> RenderedBody {
    let row_height = u64::from(row_height.max(1));

    let rows = records
        .iter()
        .zip(window.range.clone())
        .map(|(record, index)| RenderedRow {
            key: record.id.clone(),
            index,
            top: index as u64 * row_height,
            cells: columns
                .iter()
                .map(|column| column.display(record, now))
                .collect(),
        })
        .collect();

    RenderedBody {
        rows,
        total_height: window.total_height,
    }
}
