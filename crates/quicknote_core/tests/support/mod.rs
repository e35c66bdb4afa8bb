#![allow(dead_code)]

use quicknote_core::{Clock, Note, NoteStore, StoreError, StoreResult};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store that counts calls and can be told to fail saves.
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    notes: Mutex<Vec<Note>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

impl RecordingStore {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let store = Self::default();
        *store.inner.notes.lock().expect("notes lock") = notes;
        store
    }

    pub fn persisted(&self) -> Vec<Note> {
        self.inner.notes.lock().expect("notes lock").clone()
    }

    pub fn load_count(&self) -> usize {
        self.inner.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, fail: bool) {
        self.inner.fail_loads.store(fail, Ordering::SeqCst);
    }
}

impl NoteStore for RecordingStore {
    async fn load(&self) -> StoreResult<Vec<Note>> {
        self.inner.loads.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_loads.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        Ok(self.persisted())
    }

    async fn save(&self, notes: &[Note]) -> StoreResult<()> {
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        *self.inner.notes.lock().expect("notes lock") = notes.to_vec();
        Ok(())
    }
}

fn injected_failure() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("memory://notes.json"),
        source: std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
    }
}

/// Clock frozen at one millisecond value.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

pub fn note(id: &str, text: &str) -> Note {
    Note::try_new(id, text).expect("fixture note should be valid")
}
