//! Column identifiers, per-column projections and the column order.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Identifier of a displayable attribute.
///
/// `FullName` and `Dsr` (days since registration) are derived: they are
/// computed from other fields rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Id,
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    City,
    Country,
    Company,
    Age,
    RegisteredDate,
    Dsr,
}

impl ColumnKey {
    /// Every column key, in declaration order.
    pub const ALL: [ColumnKey; 12] = [
        ColumnKey::Id,
        ColumnKey::FirstName,
        ColumnKey::LastName,
        ColumnKey::FullName,
        ColumnKey::Email,
        ColumnKey::Phone,
        ColumnKey::City,
        ColumnKey::Country,
        ColumnKey::Company,
        ColumnKey::Age,
        ColumnKey::RegisteredDate,
        ColumnKey::Dsr,
    ];

    /// Columns shown when a session starts.
    pub const DEFAULT_ORDER: [ColumnKey; 10] = [
        ColumnKey::FullName,
        ColumnKey::Email,
        ColumnKey::Phone,
        ColumnKey::City,
        ColumnKey::Country,
        ColumnKey::Company,
        ColumnKey::Age,
        ColumnKey::RegisteredDate,
        ColumnKey::Dsr,
        ColumnKey::Id,
    ];

    /// Human-readable header label.
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Id => "ID",
            ColumnKey::FirstName => "First Name",
            ColumnKey::LastName => "Last Name",
            ColumnKey::FullName => "Full Name",
            ColumnKey::Email => "Email",
            ColumnKey::Phone => "Phone",
            ColumnKey::City => "City",
            ColumnKey::Country => "Country",
            ColumnKey::Company => "Company",
            ColumnKey::Age => "Age",
            ColumnKey::RegisteredDate => "Registered",
            ColumnKey::Dsr => "DSR",
        }
    }

    /// Wire name, as used in serialized data.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Id => "id",
            ColumnKey::FirstName => "firstName",
            ColumnKey::LastName => "lastName",
            ColumnKey::FullName => "fullName",
            ColumnKey::Email => "email",
            ColumnKey::Phone => "phone",
            ColumnKey::City => "city",
            ColumnKey::Country => "country",
            ColumnKey::Company => "company",
            ColumnKey::Age => "age",
            ColumnKey::RegisteredDate => "registeredDate",
            ColumnKey::Dsr => "dsr",
        }
    }

    /// Fixed display width in terminal cells, including the grip and separator.
    pub fn width(self) -> u16 {
        match self {
            ColumnKey::Id => 40,
            ColumnKey::FirstName | ColumnKey::LastName => 16,
            ColumnKey::FullName => 26,
            ColumnKey::Email => 34,
            ColumnKey::Phone => 18,
            ColumnKey::City | ColumnKey::Country => 18,
            ColumnKey::Company => 24,
            ColumnKey::Age => 9,
            ColumnKey::RegisteredDate => 16,
            ColumnKey::Dsr => 9,
        }
    }

    /// Whether the value is computed from other fields.
    pub fn is_derived(self) -> bool {
        matches!(self, ColumnKey::FullName | ColumnKey::Dsr)
    }

    /// Value used for sorting.
    ///
    /// Missing optional attributes project to the empty string.
    pub fn project(self, record: &Record, now: DateTime<Utc>) -> CellValue<'_> {
        match self {
            ColumnKey::Id => CellValue::text(&record.id),
            ColumnKey::FirstName => CellValue::text(&record.first_name),
            ColumnKey::LastName => CellValue::text(&record.last_name),
            ColumnKey::Email => CellValue::text(&record.email),
            ColumnKey::City => CellValue::text(&record.city),
            ColumnKey::Country => CellValue::text(&record.country),
            ColumnKey::Phone => CellValue::text(record.phone.as_deref().unwrap_or_default()),
            ColumnKey::Company => CellValue::text(record.company.as_deref().unwrap_or_default()),
            ColumnKey::Age => match record.age {
                Some(age) => CellValue::Number(i64::from(age)),
                None => CellValue::text(""),
            },
            ColumnKey::RegisteredDate => CellValue::Text(Cow::Owned(
                record
                    .registered_date
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            ColumnKey::FullName => CellValue::Text(Cow::Owned(record.full_name())),
            ColumnKey::Dsr => CellValue::Number(record.days_since_registration(now)),
        }
    }

    /// Text shown in a body cell.
    ///
    /// Same as the projection except for the registration date, which is shown
    /// as a local calendar date.
    pub fn display(self, record: &Record, now: DateTime<Utc>) -> String {
        match self {
            ColumnKey::RegisteredDate => record
                .registered_date
                .with_timezone(&Local)
                .format("%-m/%-d/%Y")
                .to_string(),
            _ => self.project(record, now).to_string(),
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A projected cell value: either text or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Text(Cow<'a, str>),
    Number(i64),
}

impl<'a> CellValue<'a> {
    fn text(value: &'a str) -> Self {
        CellValue::Text(Cow::Borrowed(value))
    }

    /// Numeric view of the value.
    ///
    /// Empty text is zero, text that does not parse is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n as f64,
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Move `dragged` to the slot `target` occupies, shifting the items in between.
///
/// Returns the order unchanged when both ids are equal or either one is not
/// part of the order.
pub fn reorder<T: PartialEq + Clone>(order: &[T], dragged: &T, target: &T) -> Vec<T> {
    if dragged == target {
        return order.to_vec();
    }
    let (Some(from), Some(to)) = (
        order.iter().position(|item| item == dragged),
        order.iter().position(|item| item == target),
    ) else {
        return order.to_vec();
    };

    let mut next = order.to_vec();
    let item = next.remove(from);
    next.insert(to, item);
    next
}

/// The sequence of visible columns.
///
/// Only ever permuted: the set of keys is fixed when the order is created.
/// `revision` increases on every effective change so renderers can tell when
/// to rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    keys: Vec<ColumnKey>,
    revision: u64,
}

impl ColumnOrder {
    /// Create an order from keys, dropping repeated keys.
    pub fn new(keys: impl IntoIterator<Item = ColumnKey>) -> Self {
        let mut unique = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            revision: 0,
        }
    }

    pub fn keys(&self) -> &[ColumnKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<ColumnKey> {
        self.keys.get(index).copied()
    }

    pub fn position(&self, key: ColumnKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a drag-and-drop move. Returns whether the order changed.
    pub fn reorder(&mut self, dragged: ColumnKey, target: ColumnKey) -> bool {
        let next = reorder(&self.keys, &dragged, &target);
        if next == self.keys {
            return false;
        }
        debug!("Column {} moved onto {}", dragged, target);
        self.keys = next;
        self.revision += 1;
        true
    }

    /// Move `key` by `delta` slots, treating the neighbour as the drop target.
    pub fn shift(&mut self, key: ColumnKey, delta: isize) -> bool {
        let Some(from) = self.position(key) else {
            return false;
        };
        let Some(to) = from.checked_add_signed(delta) else {
            return false;
        };
        match self.keys.get(to).copied() {
            Some(target) => self.reorder(key, target),
            None => false,
        }
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> u16 {
        self.keys.iter().map(|k| k.width()).sum()
    }

    /// Horizontal offset where the column at `index` starts.
    pub fn offset_of(&self, index: usize) -> u16 {
        self.keys.iter().take(index).map(|k| k.width()).sum()
    }
}

impl Default for ColumnOrder {
    fn default() -> Self {
        Self::new(ColumnKey::DEFAULT_ORDER)
    }
}
