//! Interaction engine for the user table.
//!
//! The crate owns everything between the record snapshot and the pixels:
//! - [`sort`] derives row order from a single-key [`SortState`]
//! - [`columns`] and [`drag`] keep the column order and drive it from drag gestures
//! - [`virtualize`] and [`render`] materialize only the rows inside the viewport
//! - [`header`] maps pointer input on header cells to sort and reorder intents
//! - [`session`] owns all of the above and memoizes the derivations
//!
//! Persistence ([`store`]) and synthetic data ([`generate`]) are the collaborators
//! the session is fed from.

pub mod columns;
pub mod config;
pub mod drag;
pub mod generate;
pub mod geometry;
pub mod header;
pub mod record;
pub mod render;
pub mod session;
pub mod sort;
pub mod store;
pub mod virtualize;

pub use columns::{CellValue, ColumnKey, ColumnOrder, reorder};
pub use config::TableConfig;
pub use drag::{DragOutcome, DragState, closest_center};
pub use geometry::{Point, Rect};
pub use header::{HeaderCell, HeaderCoordinator, HeaderHit, HeaderIntent, layout_header};
pub use record::Record;
pub use render::{RenderedBody, RenderedRow, render_body};
pub use session::TableSession;
pub use sort::{SortDirection, SortState, derive_order, sort_permutation, toggle_sort};
pub use store::{BackendError, BlobBackend, MemoryBackend, RecordStore, StoreError};
pub use virtualize::{RenderMode, RowWindow, ScrollState, Viewport, visible_range};
