//! Sort engine: single-key sort state and derived row order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::columns::{CellValue, ColumnKey};
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator glyph.
    pub fn glyph(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}

/// The active sort column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortState {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: ColumnKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: ColumnKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state after the user selects `key`.
///
/// Selecting the active key flips its direction; any other key starts ascending.
pub fn toggle_sort(current: Option<SortState>, key: ColumnKey) -> SortState {
    match current {
        Some(state) if state.key == key => SortState {
            key,
            direction: state.direction.flip(),
        },
        _ => SortState::ascending(key),
    }
}

/// Indices into `records` in derived order.
///
/// With no sort state this is the identity permutation. The sort is stable.
pub fn sort_permutation(
    records: &[Record],
    sort: Option<SortState>,
    now: DateTime<Utc>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let Some(SortState { key, direction }) = sort else {
        return indices;
    };

    let keys: Vec<SortKey> = records
        .iter()
        .map(|record| SortKey::from(key.project(record, now)))
        .collect();

    indices.sort_by(|&a, &b| {
        let ordering = keys[a].compare(&keys[b]);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    debug!(
        "Sorted {} records by {} ({:?})",
        records.len(),
        key,
        direction
    );
    indices
}

/// Records in derived order.
pub fn derive_order<'a>(
    records: &'a [Record],
    sort: Option<SortState>,
    now: DateTime<Utc>,
) -> Vec<&'a Record> {
    sort_permutation(records, sort, now)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Precomputed comparison key for one record.
#[derive(Debug)]
enum SortKey {
    Text {
        raw: String,
        /// Lowercase with accents, for the accent tie break.
        lower: String,
        /// Lowercase without accents, the primary order.
        base: String,
    },
    Number(f64),
}

impl From<CellValue<'_>> for SortKey {
    fn from(value: CellValue<'_>) -> Self {
        match value {
            CellValue::Text(text) => {
                let lower: String = text.to_lowercase().nfd().collect();
                let base = lower.chars().filter(|c| !is_combining_mark(*c)).collect();
                SortKey::Text {
                    raw: text.into_owned(),
                    lower,
                    base,
                }
            }
            CellValue::Number(n) => SortKey::Number(n as f64),
        }
    }
}

impl SortKey {
    fn as_number(&self) -> f64 {
        match self {
            SortKey::Number(n) => *n,
            SortKey::Text { raw, .. } => CellValue::Text(raw.as_str().into()).as_number(),
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (
                SortKey::Text {
                    raw: a,
                    lower: la,
                    base: ba,
                },
                SortKey::Text {
                    raw: b,
                    lower: lb,
                    base: bb,
                },
            ) => ba.cmp(bb).then_with(|| la.cmp(lb)).then_with(|| b.cmp(a)),
            _ => self.as_number().total_cmp(&other.as_number()),
        }
    }
}

/// Compare two projected values with the table's sort rules.
///
/// Two texts compare ignoring accents and case first, then unaccented before
/// accented, then lowercase before uppercase; anything else compares numerically,
/// with text coerced to a number (empty is zero, unparsable is NaN, and NaN
/// sorts after every number).
pub fn compare_values(a: &CellValue<'_>, b: &CellValue<'_>) -> Ordering {
    SortKey::from(a.clone()).compare(&SortKey::from(b.clone()))
}
