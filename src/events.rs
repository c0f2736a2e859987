//! Roster change notifications.

use crate::types::RecordId;

/// Change emitted by the roster store after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Records were loaded from the persistence slot.
    Loaded {
        /// Number of records loaded.
        count: usize,
    },
    /// A new record was appended.
    Added {
        /// Added record id.
        id: RecordId,
    },
    /// An existing record's fields were replaced.
    Updated {
        /// Updated record id.
        id: RecordId,
    },
    /// A record was removed.
    Deleted {
        /// Removed record id.
        id: RecordId,
    },
}
