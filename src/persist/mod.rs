//! Key-value slot persistence for the roster.

/// In-process map backend.
pub mod memory;
/// SQLite file backend.
pub mod sqlite;

use thiserror::Error;

use crate::student::StudentRecord;

/// Failure reading or writing a persistence slot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite backend failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Payload (de)serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other backend failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable string-keyed storage with whole-value reads and writes.
pub trait SlotBackend {
    /// Reads the value stored under `key`, `None` when absent.
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn write_slot(&mut self, key: &str, value: &str) -> PersistResult<()>;
}

/// Loads and saves the whole roster under one named slot.
///
/// The adapter is the only writer of its slot, so each [`save`](Self::save)
/// replaces the previous collection wholesale.
pub struct RosterPersistence {
    backend: Box<dyn SlotBackend>,
    slot: String,
}

impl RosterPersistence {
    /// Binds `backend` to the slot named `slot`.
    pub fn new(backend: Box<dyn SlotBackend>, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    /// Name of the bound slot.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Reads the slot, treating absent or malformed data as an empty roster.
    pub fn load(&self) -> Vec<StudentRecord> {
        let raw = match self.backend.read_slot(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "roster slot unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StudentRecord>>(&raw) {
            Ok(records) => {
                tracing::debug!(slot = %self.slot, count = records.len(), "loaded roster");
                records
            }
            Err(err) => {
                tracing::warn!(slot = %self.slot, error = %err, "roster slot malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Serializes `records` and overwrites the slot.
    pub fn save(&mut self, records: &[StudentRecord]) -> PersistResult<()> {
        let payload = serde_json::to_string(records)?;
        self.backend.write_slot(&self.slot, &payload)?;
        tracing::debug!(slot = %self.slot, count = records.len(), "saved roster");
        Ok(())
    }
}
