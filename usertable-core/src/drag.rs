//! Drag gesture state machine for column reordering.
//!
//! ```text
//! Idle --begin--> Dragging(column) --drop_at--> Dropped(target) --> Idle
//!                                  \--cancel---> Cancelled ------> Idle
//! ```

use log::debug;

use crate::columns::ColumnKey;
use crate::geometry::{Point, Rect};

/// Current drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        column: ColumnKey,
        origin: Point,
        pointer: Point,
    },
}

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released with a resolved target. The target may be the dragged column itself.
    Dropped {
        dragged: ColumnKey,
        target: ColumnKey,
    },
    /// Released without a target, or aborted.
    Cancelled { dragged: ColumnKey },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The column being dragged, if any.
    pub fn dragged(&self) -> Option<ColumnKey> {
        match self {
            DragState::Dragging { column, .. } => Some(*column),
            DragState::Idle => None,
        }
    }

    /// Last known pointer position of an active drag.
    pub fn pointer(&self) -> Option<Point> {
        match self {
            DragState::Dragging { pointer, .. } => Some(*pointer),
            DragState::Idle => None,
        }
    }

    /// Start dragging `column`. Ignored unless idle.
    pub fn begin(&mut self, column: ColumnKey, at: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        debug!("Drag started on {} at ({}, {})", column, at.x, at.y);
        *self = DragState::Dragging {
            column,
            origin: at,
            pointer: at,
        };
        true
    }

    /// Track the pointer. Returns whether the position changed.
    pub fn update(&mut self, at: Point) -> bool {
        match self {
            DragState::Dragging { pointer, .. } if *pointer != at => {
                *pointer = at;
                true
            }
            _ => false,
        }
    }

    /// Release the pointer at `at`, resolving the drop target among `targets`.
    pub fn drop_at<I>(&mut self, at: Point, targets: I) -> Option<DragOutcome>
    where
        I: IntoIterator<Item = (ColumnKey, Rect)>,
    {
        let DragState::Dragging { column, .. } = std::mem::take(self) else {
            return None;
        };
        let outcome = match closest_center(targets, at) {
            Some(target) => DragOutcome::Dropped {
                dragged: column,
                target,
            },
            None => DragOutcome::Cancelled { dragged: column },
        };
        debug!("Drag ended: {:?}", outcome);
        Some(outcome)
    }

    /// Abort the gesture without a drop.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        let DragState::Dragging { column, .. } = std::mem::take(self) else {
            return None;
        };
        debug!("Drag on {} cancelled", column);
        Some(DragOutcome::Cancelled { dragged: column })
    }

    /// The target a release at the current pointer would resolve to.
    pub fn hover_target<I>(&self, targets: I) -> Option<ColumnKey>
    where
        I: IntoIterator<Item = (ColumnKey, Rect)>,
    {
        self.pointer().and_then(|at| closest_center(targets, at))
    }
}

/// The target whose center is nearest to `pointer`.
///
/// Ties go to the first target. Empty targets are skipped; with no candidates
/// there is no target.
pub fn closest_center<K, I>(targets: I, pointer: Point) -> Option<K>
where
    I: IntoIterator<Item = (K, Rect)>,
{
    targets
        .into_iter()
        .filter(|(_, rect)| !rect.is_empty())
        .map(|(key, rect)| (rect.center_distance_sq(pointer), key))
        .fold(None, |best: Option<(u64, K)>, (distance, key)| match best {
            Some((best_distance, _)) if best_distance <= distance => best,
            _ => Some((distance, key)),
        })
        .map(|(_, key)| key)
}
