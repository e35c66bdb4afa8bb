//! JSON file backend for the notes document.
//!
//! # Responsibility
//! - Read and parse `notes.json` as one JSON array.
//! - Rewrite the whole document through a temp file + rename.
//!
//! # Invariants
//! - Writers never leave a half-written `notes.json` behind.
//! - Note text never appears in log events.

use super::{NoteStore, StoreError, StoreResult};
use crate::config::NotesConfig;
use crate::model::note::Note;
use log::{error, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = ".tmp";

/// Notes store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for an explicit document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the configured notes document path.
    pub fn from_config(config: &NotesConfig) -> Self {
        Self::new(config.notes_file())
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_else(|| OsString::from("notes.json"));
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_document(&self) -> StoreResult<Vec<Note>> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|err| self.io_error(err))?;
        if !exists {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|err| self.io_error(err))?;
        decode_notes(&self.path, &content)
    }

    async fn write_document(&self, notes: &[Note]) -> StoreResult<()> {
        let encoded = encode_notes(notes)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error(err))?;
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, encoded.as_bytes())
            .await
            .map_err(|err| self.io_error(err))?;
        if let Err(err) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.io_error(err));
        }
        Ok(())
    }
}

impl NoteStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<Note>> {
        let started_at = Instant::now();
        match self.read_document().await {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(notes)
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    async fn save(&self, notes: &[Note]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_document(notes).await {
            Ok(()) => {
                info!(
                    "event=notes_save module=store status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=notes_save module=store status=error count={} duration_ms={} error_code={} error={}",
                    notes.len(),
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Parses a notes document and validates every record.
///
/// Content that is not UTF-8 is reported as `Malformed`, like any other
/// undecodable document.
pub fn decode_notes(path: &Path, content: &[u8]) -> StoreResult<Vec<Note>> {
    let notes: Vec<Note> =
        serde_json::from_slice(content).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    for (index, note) in notes.iter().enumerate() {
        note.validate().map_err(|source| StoreError::InvalidRecord {
            path: path.to_path_buf(),
            index,
            source,
        })?;
    }
    Ok(notes)
}

/// Encodes the full list as a compact JSON array.
pub fn encode_notes(notes: &[Note]) -> StoreResult<String> {
    Ok(serde_json::to_string(notes)?)
}
