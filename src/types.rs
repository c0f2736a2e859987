//! Shared identifiers, field names, and configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, immutable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an existing identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrows the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One of the four editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Student name.
    Name,
    /// Student ID.
    Sid,
    /// Email address.
    Email,
    /// Contact number.
    Contact,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Sid, Field::Email, Field::Contact];
}

/// Roster configuration supplied at construction.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Key of the persistence slot holding the serialized roster.
    pub slot_key: String,
    /// Rows above this count make the table scrollable.
    pub scroll_threshold: usize,
    /// Maximum table height in pixels once scrollable.
    pub max_height_px: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            slot_key: "students".to_string(),
            scroll_threshold: 5,
            max_height_px: 300,
        }
    }
}
