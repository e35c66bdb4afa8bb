//! Notes persistence boundary.
//!
//! # Responsibility
//! - Define the load/save contract for the single notes document.
//! - Map I/O and decoding failures to semantic store errors.
//!
//! # Invariants
//! - Every save rewrites the whole document; there is no append path.
//! - A missing document loads as an empty list, never as an error.
//! - Stores hold no cached copy of the list.

use crate::model::note::{Note, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::path::PathBuf;

pub mod json_file;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for the notes document.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying file read/write failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document exists but is not a JSON array of notes.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Document parsed but one record breaks note invariants.
    InvalidRecord {
        path: PathBuf,
        index: usize,
        source: NoteValidationError,
    },
    /// Note list could not be encoded.
    Serialize(serde_json::Error),
}

impl StoreError {
    /// Returns whether the document content (not the device) is at fault.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::InvalidRecord { .. })
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "store_io_failed",
            Self::Malformed { .. } => "store_malformed_json",
            Self::InvalidRecord { .. } => "store_invalid_record",
            Self::Serialize(_) => "store_serialize_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "notes file `{}`: {source}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed notes file `{}`: {source}", path.display())
            }
            Self::InvalidRecord {
                path,
                index,
                source,
            } => write!(
                f,
                "invalid note at index {index} in `{}`: {source}",
                path.display()
            ),
            Self::Serialize(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable read/write of the full note list.
///
/// Implementations are driven by exactly one notes screen; no locking is
/// expected.
pub trait NoteStore: Send + Sync + 'static {
    /// Loads every persisted note in insertion order.
    fn load(&self) -> impl Future<Output = StoreResult<Vec<Note>>> + Send;
    /// Replaces the persisted document with `notes`.
    fn save(&self, notes: &[Note]) -> impl Future<Output = StoreResult<()>> + Send;
}
