//! Notes screen state and user actions.
//!
//! # Responsibility
//! - Hold draft text, note list and the loaded flag.
//! - Implement initial load, add, delete with persist-then-reflect semantics.
//!
//! # Invariants
//! - `notes` changes only after the store accepted the new list.
//! - The store is loaded at most once; add/delete mount first when needed so
//!   an early save never clobbers the persisted list.

use super::render::{Alert, ScreenModel};
use crate::model::id::{Clock, NoteIdGenerator, SystemClock};
use crate::model::note::{is_blank, Note};
use crate::store::{NoteStore, StoreError};
use log::{error, info, warn};

/// Result of pressing "Add Note".
#[derive(Debug)]
pub enum AddOutcome {
    /// Note persisted and appended; draft cleared.
    Added(Note),
    /// Draft was blank; nothing changed and nothing was written.
    Rejected(Alert),
    /// Save failed; draft and list unchanged.
    Failed(StoreError),
}

/// Result of pressing "Delete" on a row.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// List persisted; `removed` is false when the id was not present.
    Deleted { removed: bool },
    /// Save failed; list unchanged.
    Failed(StoreError),
}

/// In-memory state of the notes screen.
pub struct NotesScreen<S: NoteStore, C: Clock = SystemClock> {
    store: S,
    ids: NoteIdGenerator<C>,
    draft: String,
    notes: Vec<Note>,
    loaded: bool,
}

impl<S: NoteStore> NotesScreen<S> {
    /// Creates an unmounted screen using wall-clock ids.
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, NoteIdGenerator::default())
    }
}

impl<S: NoteStore, C: Clock> NotesScreen<S, C> {
    /// Creates an unmounted screen with a caller-provided id generator.
    pub fn with_id_generator(store: S, ids: NoteIdGenerator<C>) -> Self {
        Self {
            store,
            ids,
            draft: String::new(),
            notes: Vec::new(),
            loaded: false,
        }
    }

    /// Runs the initial load once.
    ///
    /// Returns `false` when the screen was already mounted. Load failures,
    /// malformed documents included, are logged and leave the list empty.
    pub async fn mount(&mut self) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;

        match self.store.load().await {
            Ok(notes) => {
                self.ids.observe(notes.iter().map(|note| &note.id));
                info!(
                    "event=screen_mount module=screen status=ok count={}",
                    notes.len()
                );
                self.notes = notes;
            }
            Err(err) => {
                error!(
                    "event=screen_mount module=screen status=error error_code={} malformed={} error={}",
                    err.code(),
                    err.is_malformed(),
                    err
                );
            }
        }
        true
    }

    /// Replaces the draft text (input binding).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Validates the draft, persists the appended list, then reflects it.
    pub async fn add(&mut self) -> AddOutcome {
        if is_blank(&self.draft) {
            warn!("event=note_add module=screen status=rejected reason=empty_text");
            return AddOutcome::Rejected(Alert::empty_note());
        }
        self.mount().await;

        let note = Note {
            id: self.ids.next_id(),
            text: self.draft.clone(),
        };
        let mut updated = self.notes.clone();
        updated.push(note.clone());

        match self.store.save(&updated).await {
            Ok(()) => {
                info!(
                    "event=note_add module=screen status=ok note_id={} count={}",
                    note.id,
                    updated.len()
                );
                self.notes = updated;
                self.draft.clear();
                AddOutcome::Added(note)
            }
            Err(err) => {
                error!(
                    "event=note_add module=screen status=error error_code={} error={}",
                    err.code(),
                    err
                );
                AddOutcome::Failed(err)
            }
        }
    }

    /// Persists the list without `id`, then reflects it.
    pub async fn delete(&mut self, id: &str) -> DeleteOutcome {
        self.mount().await;

        let updated = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect::<Vec<_>>();
        let removed = updated.len() != self.notes.len();

        match self.store.save(&updated).await {
            Ok(()) => {
                info!(
                    "event=note_delete module=screen status=ok note_id={} removed={} count={}",
                    id,
                    removed,
                    updated.len()
                );
                self.notes = updated;
                DeleteOutcome::Deleted { removed }
            }
            Err(err) => {
                error!(
                    "event=note_delete module=screen status=error note_id={} error_code={} error={}",
                    id,
                    err.code(),
                    err
                );
                DeleteOutcome::Failed(err)
            }
        }
    }

    /// Builds the current screen model.
    pub fn render(&self) -> ScreenModel {
        ScreenModel::build(&self.draft, &self.notes)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
