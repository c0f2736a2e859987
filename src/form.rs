//! Form controller: input sanitization, validation dispatch, and edit mode.

use crate::{
    core::store::{Confirm, RosterStore},
    persist::{PersistResult, RosterPersistence, SlotBackend},
    render::{RosterView, render},
    student::StudentFields,
    types::{Field, RecordId, RosterConfig},
    validate::{DUPLICATE_SID, FieldErrors, sanitize, validate_fields},
};

/// Submit label while adding a new record.
pub const SAVE_LABEL: &str = "Save";
/// Submit label while editing an existing record.
pub const UPDATE_LABEL: &str = "Update";

/// Whether submit creates a record or updates the bound one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submit adds a new record.
    #[default]
    Adding,
    /// Submit updates the record with this id.
    Editing(RecordId),
}

impl FormMode {
    /// Id bound for editing, if any.
    pub fn editing_id(&self) -> Option<&RecordId> {
        match self {
            Self::Adding => None,
            Self::Editing(id) => Some(id),
        }
    }
}

/// User action routed through [`FormController::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Row "Edit" action.
    Edit(RecordId),
    /// Row "Delete" action.
    Delete(RecordId),
    /// Form submit.
    Submit,
    /// Form "Clear".
    Clear,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A record was added under this id.
    Added(RecordId),
    /// The bound record was updated.
    Updated(RecordId),
    /// The bound record no longer existed; nothing was written.
    Stale(RecordId),
    /// Validation or the duplicate check failed; the roster is unchanged.
    Rejected(FieldErrors),
}

/// Drives the roster form over an owned [`RosterStore`].
pub struct FormController {
    store: RosterStore,
    config: RosterConfig,
    mode: FormMode,
    fields: StudentFields,
    errors: FieldErrors,
    view: RosterView,
}

impl FormController {
    /// Opens the roster slot named by `config` on `backend`.
    pub fn open(backend: Box<dyn SlotBackend>, config: RosterConfig) -> Self {
        let persistence = RosterPersistence::new(backend, config.slot_key.clone());
        Self::new(RosterStore::open(persistence), config)
    }

    /// Wraps an already opened store and renders it.
    pub fn new(mut store: RosterStore, config: RosterConfig) -> Self {
        store.drain_events();
        let view = render(store.records(), &config);
        Self {
            store,
            config,
            mode: FormMode::Adding,
            fields: StudentFields::default(),
            errors: FieldErrors::default(),
            view,
        }
    }

    /// Sanitizes `raw` for `field` and stores it as the current input.
    pub fn input(&mut self, field: Field, raw: &str) -> &str {
        let value = self.fields.get_mut(field);
        *value = sanitize(field, raw);
        value
    }

    /// Binds the form to `id`, copying its fields in.
    ///
    /// Returns false and leaves the form untouched when `id` is unknown.
    pub fn begin_edit(&mut self, id: &RecordId) -> bool {
        let Some(rec) = self.store.find_by_id(id) else {
            return false;
        };
        self.fields = rec.fields();
        self.errors.clear();
        self.mode = FormMode::Editing(id.clone());
        tracing::debug!(%id, "editing student");
        true
    }

    /// Resets inputs and errors and returns to adding mode.
    pub fn clear(&mut self) {
        self.fields = StudentFields::default();
        self.errors.clear();
        self.mode = FormMode::Adding;
    }

    /// Validates the current input and adds or updates a record.
    ///
    /// Every validator runs; on any error the form keeps its state and the
    /// roster is not touched. A failed save also keeps the form as it was.
    /// A successful submit clears the form.
    pub fn submit(&mut self) -> PersistResult<SubmitOutcome> {
        let fields = self.fields.trimmed();
        let mut errors = validate_fields(&fields);
        if errors.is_empty() && self.store.has_duplicate_sid(&fields.sid, self.mode.editing_id()) {
            errors.set(Field::Sid, DUPLICATE_SID);
        }
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "submit rejected");
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let outcome = match self.mode.clone() {
            FormMode::Adding => SubmitOutcome::Added(self.store.add(fields)?),
            FormMode::Editing(id) => {
                if self.store.update(&id, fields)? {
                    SubmitOutcome::Updated(id)
                } else {
                    SubmitOutcome::Stale(id)
                }
            }
        };
        self.refresh();
        self.clear();
        Ok(outcome)
    }

    /// Deletes `id` once `confirm` accepts.
    ///
    /// Deleting the record under edit also clears the form.
    pub fn request_delete<C: Confirm + ?Sized>(&mut self, id: &RecordId, confirm: &mut C) -> PersistResult<bool> {
        let deleted = self.store.delete(id, confirm)?;
        self.refresh();

        if deleted && self.mode.editing_id() == Some(id) {
            self.clear();
        }
        Ok(deleted)
    }

    /// Routes one user action; returns true when it took effect.
    pub fn dispatch<C: Confirm + ?Sized>(&mut self, action: UiAction, confirm: &mut C) -> PersistResult<bool> {
        match action {
            UiAction::Edit(id) => Ok(self.begin_edit(&id)),
            UiAction::Delete(id) => self.request_delete(&id, confirm),
            UiAction::Submit => Ok(!matches!(self.submit()?, SubmitOutcome::Rejected(_))),
            UiAction::Clear => {
                self.clear();
                Ok(true)
            }
        }
    }

    /// Current mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Label for the submit action in the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Adding => SAVE_LABEL,
            FormMode::Editing(_) => UPDATE_LABEL,
        }
    }

    /// Current (sanitized, untrimmed) input values.
    pub fn fields(&self) -> &StudentFields {
        &self.fields
    }

    /// Errors shown since the last submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Latest rendered table.
    pub fn view(&self) -> &RosterView {
        &self.view
    }

    /// Underlying store.
    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    /// Active configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    fn refresh(&mut self) {
        let events = self.store.drain_events();
        if events.is_empty() {
            return;
        }
        tracing::trace!(events = events.len(), "re-rendering roster");
        self.view = render(self.store.records(), &self.config);
    }
}
