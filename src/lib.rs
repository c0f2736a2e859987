//! Student roster editing core: validated CRUD over a persisted record list.
//!
//! # Examples
//!
//! Driving the form with an in-memory slot backend:
//! ```
//! use roster::{
//!     form::{FormController, SubmitOutcome},
//!     persist::memory::MemoryBackend,
//!     types::{Field, RosterConfig},
//! };
//!
//! let backend = MemoryBackend::new();
//! let mut form = FormController::open(Box::new(backend.clone()), RosterConfig::default());
//! form.input(Field::Name, "Ann Lee");
//! form.input(Field::Sid, "1001");
//! form.input(Field::Email, "a@b.com");
//! form.input(Field::Contact, "1234567890");
//!
//! let outcome = form.submit().expect("save");
//! assert!(matches!(outcome, SubmitOutcome::Added(_)));
//! assert_eq!(form.view().rows.len(), 1);
//! assert!(backend.raw("students").is_some());
//! ```
//!
//! Using the store directly with a SQLite file:
//! ```no_run
//! use roster::{
//!     core::store::RosterStore,
//!     persist::{sqlite::SqliteBackend, RosterPersistence},
//!     student::StudentFields,
//! };
//!
//! let backend = SqliteBackend::open("roster.db").expect("open sqlite");
//! let mut store = RosterStore::open(RosterPersistence::new(Box::new(backend), "students"));
//! let id = store
//!     .add(StudentFields::new("Ann Lee", "1001", "a@b.com", "1234567890"))
//!     .expect("add");
//! store.delete(&id, &mut |_: &str| true).expect("delete");
//! ```
#![deny(missing_docs)]

/// Core in-memory store and index helpers.
pub mod core;
/// Store change notifications.
pub mod events;
/// Form controller and edit-mode state machine.
pub mod form;
/// Persistence adapter and slot backends.
pub mod persist;
/// Table projection and escaping.
pub mod render;
/// Student record and field payloads.
pub mod student;
/// Shared identifiers, field names, and configuration.
pub mod types;
/// Field validators and input sanitizers.
pub mod validate;
