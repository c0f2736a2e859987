use std::{cell::Cell, rc::Rc};

use roster::{
    core::store::{DELETE_PROMPT, RosterStore},
    events::RosterEvent,
    persist::{PersistError, PersistResult, RosterPersistence, SlotBackend, memory::MemoryBackend},
    student::{StudentFields, StudentRecord},
    types::RecordId,
};

fn fields(name: &str, sid: &str) -> StudentFields {
    StudentFields::new(name, sid, "a@b.com", "1234567890")
}

fn open(backend: &MemoryBackend) -> RosterStore {
    RosterStore::open(RosterPersistence::new(Box::new(backend.clone()), "students"))
}

#[test]
fn add_assigns_unique_ids_in_insertion_order() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);

    let a = store.add(fields("Ann", "1")).unwrap();
    let b = store.add(fields("Bob", "2")).unwrap();
    let c = store.add(fields("Cid", "3")).unwrap();

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_eq!(store.ordered_ids(), vec![a.clone(), b, c]);
    assert_eq!(store.find_by_id(&a).unwrap().name, "Ann");
    assert_eq!(backend.write_count(), 3);
}

#[test]
fn update_preserves_id_and_position() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1")).unwrap();
    let b = store.add(fields("Bob", "2")).unwrap();

    assert!(store.update(&a, fields("Ann M Lee", "9")).unwrap());

    assert_eq!(store.ordered_ids(), vec![a.clone(), b]);
    let rec = store.find_by_id(&a).unwrap();
    assert_eq!(rec.id, a);
    assert_eq!(rec.name, "Ann M Lee");
    assert!(store.has_duplicate_sid("9", None));
    assert!(!store.has_duplicate_sid("1", None));
}

#[test]
fn update_of_missing_id_is_silent_noop() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.add(fields("Ann", "1")).unwrap();
    store.drain_events();

    let applied = store.update(&RecordId::new("missing"), fields("Bob", "2")).unwrap();

    assert!(!applied);
    assert_eq!(backend.write_count(), 1);
    assert!(store.drain_events().is_empty());
}

#[test]
fn declined_delete_changes_nothing_and_skips_write() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1")).unwrap();
    let before = backend.raw("students");

    let mut prompts = Vec::new();
    let deleted = store
        .delete(&a, &mut |p: &str| {
            prompts.push(p.to_string());
            false
        })
        .unwrap();

    assert!(!deleted);
    assert_eq!(prompts, vec![DELETE_PROMPT.to_string()]);
    assert_eq!(store.len(), 1);
    assert_eq!(backend.write_count(), 1);
    assert_eq!(backend.raw("students"), before);
}

#[test]
fn confirmed_delete_removes_and_reindexes() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1")).unwrap();
    let b = store.add(fields("Bob", "2")).unwrap();
    let c = store.add(fields("Cid", "3")).unwrap();

    assert!(store.delete(&b, &mut |_: &str| true).unwrap());

    assert_eq!(store.ordered_ids(), vec![a, c.clone()]);
    assert_eq!(store.find_by_id(&c).unwrap().name, "Cid");
    assert!(store.find_by_id(&b).is_none());
    assert!(!store.has_duplicate_sid("2", None));
    assert!(!store.delete(&b, &mut |_: &str| true).unwrap());
    assert_eq!(backend.write_count(), 4);
}

#[test]
fn duplicate_sid_honours_exclusion() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1001")).unwrap();

    assert!(store.has_duplicate_sid("1001", None));
    assert!(!store.has_duplicate_sid("1001", Some(&a)));
    assert!(!store.has_duplicate_sid("2002", None));
}

#[test]
fn reopen_restores_records_and_allocates_unused_ids() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1")).unwrap();
    let b = store.add(fields("Bob", "2")).unwrap();
    store.delete(&b, &mut |_: &str| true).unwrap();

    let mut reopened = open(&backend);
    assert_eq!(reopened.records(), store.records());
    assert_eq!(
        reopened.drain_events(),
        vec![RosterEvent::Loaded { count: 1 }]
    );

    let c = reopened.add(fields("Cid", "3")).unwrap();
    assert_ne!(c, a);
}

#[test]
fn mutations_emit_events() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.drain_events();

    let a = store.add(fields("Ann", "1")).unwrap();
    store.update(&a, fields("Ann", "5")).unwrap();
    store.delete(&a, &mut |_: &str| true).unwrap();

    assert_eq!(
        store.drain_events(),
        vec![
            RosterEvent::Added { id: a.clone() },
            RosterEvent::Updated { id: a.clone() },
            RosterEvent::Deleted { id: a },
        ]
    );
}

struct FailingBackend {
    inner: MemoryBackend,
    failing: Rc<Cell<bool>>,
}

impl SlotBackend for FailingBackend {
    fn read_slot(&self, key: &str) -> PersistResult<Option<String>> {
        self.inner.read_slot(key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> PersistResult<()> {
        if self.failing.get() {
            return Err(PersistError::Message("disk full".to_string()));
        }
        self.inner.write_slot(key, value)
    }
}

fn open_failing(backend: &MemoryBackend, failing: &Rc<Cell<bool>>) -> RosterStore {
    let failing = FailingBackend {
        inner: backend.clone(),
        failing: Rc::clone(failing),
    };
    RosterStore::open(RosterPersistence::new(Box::new(failing), "students"))
}

fn slot_records(backend: &MemoryBackend) -> Vec<StudentRecord> {
    serde_json::from_str(&backend.raw("students").unwrap_or_else(|| "[]".to_string())).unwrap()
}

#[test]
fn failed_save_leaves_memory_matching_slot() {
    let backend = MemoryBackend::new();
    let failing = Rc::new(Cell::new(false));
    let mut store = open_failing(&backend, &failing);
    let a = store.add(fields("Ann", "1")).unwrap();
    store.drain_events();

    failing.set(true);
    let err = store.add(fields("Bob", "2")).unwrap_err();
    assert!(matches!(err, PersistError::Message(ref m) if m == "disk full"));
    assert!(store.update(&a, fields("Ann M Lee", "9")).is_err());
    assert!(store.delete(&a, &mut true).is_err());

    assert_eq!(store.records(), slot_records(&backend).as_slice());
    assert_eq!(store.len(), 1);
    assert_eq!(store.find_by_id(&a).unwrap().name, "Ann");
    assert!(store.has_duplicate_sid("1", None));
    assert!(!store.has_duplicate_sid("2", None));
    assert!(!store.has_duplicate_sid("9", None));
    assert!(store.drain_events().is_empty());

    failing.set(false);
    let b = store.add(fields("Bob", "2")).unwrap();
    assert_eq!(store.ordered_ids(), vec![a, b]);
    assert_eq!(store.records(), slot_records(&backend).as_slice());
}

#[test]
fn bool_answers_the_delete_prompt() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let a = store.add(fields("Ann", "1")).unwrap();

    assert!(!store.delete(&a, &mut false).unwrap());
    assert_eq!(store.len(), 1);
    assert!(store.delete(&a, &mut true).unwrap());
    assert!(store.is_empty());
}
