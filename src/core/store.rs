use hashbrown::HashMap;

use crate::{
    core::indices::VecIndex,
    events::RosterEvent,
    persist::{PersistResult, RosterPersistence},
    student::{StudentFields, StudentRecord},
    types::RecordId,
};

/// Prompt passed to the [`Confirm`] gate before a delete.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

/// Interactive yes/no gate consulted before destructive operations.
pub trait Confirm {
    /// Returns true when the user accepts `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

/// Ordered, persisted collection of student records.
pub struct RosterStore {
    records: Vec<StudentRecord>,
    pos: HashMap<RecordId, usize>,
    by_sid: VecIndex<String>,
    persistence: RosterPersistence,
    pending_events: Vec<RosterEvent>,
    next_id: u64,
}

impl RosterStore {
    /// Loads the roster from `persistence`.
    ///
    /// Records repeating an earlier id are dropped so ids stay unique.
    pub fn open(persistence: RosterPersistence) -> Self {
        let loaded = persistence.load();
        let mut store = Self {
            records: Vec::with_capacity(loaded.len()),
            pos: HashMap::new(),
            by_sid: HashMap::new(),
            persistence,
            pending_events: Vec::new(),
            next_id: 1,
        };

        for rec in loaded {
            if store.pos.contains_key(&rec.id) {
                tracing::warn!(id = %rec.id, "dropping record with repeated id");
                continue;
            }
            if let Ok(n) = rec.id.as_str().parse::<u64>() {
                store.next_id = store.next_id.max(n.saturating_add(1));
            }
            store.insert_indices(&rec);
            store.pos.insert(rec.id.clone(), store.records.len());
            store.records.push(rec);
        }

        store.pending_events.push(RosterEvent::Loaded {
            count: store.records.len(),
        });
        store
    }

    /// Appends a record built from `fields` under a fresh id and persists.
    ///
    /// Fields are stored as given; validation is the caller's job. The
    /// roster is only changed once the save succeeds.
    pub fn add(&mut self, fields: StudentFields) -> PersistResult<RecordId> {
        let id = self.allocate_id();
        let rec = fields.into_record(id.clone());

        let mut next = self.records.clone();
        next.push(rec.clone());
        self.persist(&next)?;

        self.insert_indices(&rec);
        self.pos.insert(id.clone(), self.records.len());
        self.records.push(rec);
        tracing::debug!(%id, "student added");

        self.pending_events.push(RosterEvent::Added { id: id.clone() });
        Ok(id)
    }

    /// Replaces the non-id fields of `id` in place and persists.
    ///
    /// Returns `Ok(false)` without writing when `id` is unknown. The record
    /// is only changed once the save succeeds.
    pub fn update(&mut self, id: &RecordId, fields: StudentFields) -> PersistResult<bool> {
        let Some(&idx) = self.pos.get(id) else {
            tracing::debug!(%id, "update target missing");
            return Ok(false);
        };

        let mut next = self.records.clone();
        next[idx].apply(fields);
        self.persist(&next)?;

        let old_sid = std::mem::replace(&mut self.records, next)[idx].sid.clone();
        if self.records[idx].sid != old_sid {
            if let Some(ids) = self.by_sid.get_mut(&old_sid) {
                remove_id(ids, id);
                if ids.is_empty() {
                    self.by_sid.remove(&old_sid);
                }
            }
            self.by_sid
                .entry(self.records[idx].sid.clone())
                .or_default()
                .push(id.clone());
        }
        tracing::debug!(%id, "student updated");

        self.pending_events.push(RosterEvent::Updated { id: id.clone() });
        Ok(true)
    }

    /// Removes `id` after `confirm` accepts; persists only if a record went away.
    ///
    /// Returns `Ok(false)` when declined or when `id` is unknown. The record
    /// is only removed once the save succeeds.
    pub fn delete<C: Confirm + ?Sized>(&mut self, id: &RecordId, confirm: &mut C) -> PersistResult<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(%id, "delete declined");
            return Ok(false);
        }

        let Some(&idx) = self.pos.get(id) else {
            tracing::debug!(%id, "delete target missing");
            return Ok(false);
        };

        let mut next = self.records.clone();
        let rec = next.remove(idx);
        self.persist(&next)?;

        self.records = next;
        self.pos.remove(id);
        if let Some(ids) = self.by_sid.get_mut(&rec.sid) {
            remove_id(ids, id);
            if ids.is_empty() {
                self.by_sid.remove(&rec.sid);
            }
        }
        for (i, later) in self.records.iter().enumerate().skip(idx) {
            self.pos.insert(later.id.clone(), i);
        }
        tracing::debug!(%id, "student deleted");

        self.pending_events.push(RosterEvent::Deleted { id: id.clone() });
        Ok(true)
    }

    /// Looks up a record by id.
    pub fn find_by_id(&self, id: &RecordId) -> Option<&StudentRecord> {
        self.pos.get(id).map(|&idx| &self.records[idx])
    }

    /// True when a record other than `excluding` already uses `sid`.
    pub fn has_duplicate_sid(&self, sid: &str, excluding: Option<&RecordId>) -> bool {
        self.by_sid
            .get(sid)
            .is_some_and(|ids| ids.iter().any(|id| Some(id) != excluding))
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Ids in insertion order.
    pub fn ordered_ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the roster holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Takes the change events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<RosterEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn persist(&mut self, next: &[StudentRecord]) -> PersistResult<()> {
        self.persistence.save(next).inspect_err(|err| {
            tracing::error!(slot = %self.persistence.slot(), error = %err, "failed to save roster");
        })
    }

    fn allocate_id(&mut self) -> RecordId {
        loop {
            let id = RecordId::new(self.next_id.to_string());
            self.next_id += 1;
            if !self.pos.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert_indices(&mut self, rec: &StudentRecord) {
        self.by_sid
            .entry(rec.sid.clone())
            .or_default()
            .push(rec.id.clone());
    }
}

fn remove_id(v: &mut Vec<RecordId>, id: &RecordId) {
    if let Some(pos) = v.iter().position(|x| x == id) {
        v.remove(pos);
    }
}
