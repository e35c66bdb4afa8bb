//! Notes storage configuration.
//!
//! # Responsibility
//! - Resolve the single notes document location once at startup.
//!
//! # Invariants
//! - The document file name is fixed (`notes.json`).
//! - Resolution order: explicit dir, `QUICKNOTE_NOTES_DIR`, platform document
//!   dir + `quicknote`, temp dir + `quicknote`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Env var overriding the notes directory.
pub const NOTES_DIR_ENV: &str = "QUICKNOTE_NOTES_DIR";
/// Fixed document file name.
pub const NOTES_FILE_NAME: &str = "notes.json";
const APP_DIR_NAME: &str = "quicknote";

/// Invalid configuration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyNotesDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNotesDir => write!(f, "notes_dir cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Location of the notes document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    notes_dir: PathBuf,
}

impl NotesConfig {
    /// Uses an explicit notes directory.
    pub fn with_notes_dir(notes_dir: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = notes_dir.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyNotesDir);
        }
        Ok(Self {
            notes_dir: PathBuf::from(trimmed),
        })
    }

    /// Resolves the notes directory from an optional override, then
    /// environment and platform defaults.
    pub fn resolve(explicit_dir: Option<&str>) -> Self {
        if let Some(config) = explicit_dir.and_then(|dir| Self::with_notes_dir(dir).ok()) {
            return config;
        }
        if let Ok(raw) = std::env::var(NOTES_DIR_ENV) {
            if let Ok(config) = Self::with_notes_dir(raw) {
                return config;
            }
        }
        let base = dirs::document_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            notes_dir: base.join(APP_DIR_NAME),
        }
    }

    /// Directory holding the notes document.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Full path of the notes document.
    pub fn notes_file(&self) -> PathBuf {
        self.notes_dir.join(NOTES_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, NotesConfig, NOTES_FILE_NAME};
    use std::path::Path;

    #[test]
    fn with_notes_dir_trims_and_joins_fixed_file_name() {
        let config =
            NotesConfig::with_notes_dir("  /data/app  ").expect("padded dir should be accepted");
        assert_eq!(config.notes_dir(), Path::new("/data/app"));
        assert_eq!(
            config.notes_file(),
            Path::new("/data/app").join(NOTES_FILE_NAME)
        );
    }

    #[test]
    fn with_notes_dir_rejects_blank_input() {
        let err = NotesConfig::with_notes_dir("   ").expect_err("blank dir should be rejected");
        assert_eq!(err, ConfigError::EmptyNotesDir);
    }

    #[test]
    fn resolve_prefers_explicit_dir() {
        let config = NotesConfig::resolve(Some("/explicit"));
        assert_eq!(config.notes_dir(), Path::new("/explicit"));
    }

    #[test]
    fn resolve_ignores_blank_explicit_dir() {
        let config = NotesConfig::resolve(Some(" "));
        assert!(!config.notes_dir().as_os_str().is_empty());
    }
}
