//! The user record held by the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// One user row.
///
/// Serialized with camelCase keys, which is also the shape of the persisted
/// blob. Optional attributes may be missing from stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier, used as the render key of the row.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub registered_date: DateTime<Utc>,
}

impl Record {
    /// Create a record with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        registered_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            phone: None,
            city: String::new(),
            country: String::new(),
            company: None,
            age: None,
            registered_date,
        }
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole days elapsed between registration and `now`, rounded down.
    pub fn days_since_registration(&self, now: DateTime<Utc>) -> i64 {
        (now - self.registered_date)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY)
    }
}
