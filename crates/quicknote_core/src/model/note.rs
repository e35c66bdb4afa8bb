//! Note domain model.
//!
//! # Responsibility
//! - Define the `(id, text)` record persisted in the notes document.
//! - Validate note shape before creation and after load.
//!
//! # Invariants
//! - `id` is non-empty and never reassigned.
//! - `text` is non-empty after trimming whitespace.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one note.
///
/// Kept as a type alias so the persisted shape stays a plain JSON string.
pub type NoteId = String;

/// Validation failures for note records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Note text is empty or whitespace-only.
    EmptyText,
    /// Note id is empty or whitespace-only.
    EmptyId,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::EmptyId => write!(f, "note id cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// User-authored text record.
///
/// Serialized as `{"id": "...", "text": "..."}` inside the notes document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Raw text as typed by the user.
    pub text: String,
}

impl Note {
    /// Creates a note after validating both fields.
    pub fn try_new(
        id: impl Into<NoteId>,
        text: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: id.into(),
            text: text.into(),
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if is_blank(&self.text) {
            return Err(NoteValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Returns whether `text` has no content after trimming.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
