//! Core logic for QuickNote.
//! This crate owns the note list, its JSON document and the screen actor.

pub mod config;
pub mod logging;
pub mod model;
pub mod screen;
pub mod store;

pub use config::{ConfigError, NotesConfig, NOTES_DIR_ENV, NOTES_FILE_NAME};
pub use logging::{default_log_dir, init_logging, logging_status, LogLevel, LoggingError};
pub use model::id::{Clock, NoteIdGenerator, SystemClock};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use screen::actor::{NotesScreenHandle, ScreenClosed};
pub use screen::render::{Alert, InputField, NoteRow, ScreenModel};
pub use screen::state::{AddOutcome, DeleteOutcome, NotesScreen};
pub use store::json_file::JsonFileStore;
pub use store::{NoteStore, StoreError, StoreResult};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Spawns a screen actor over the configured JSON document.
///
/// Must be called from within a tokio runtime.
pub fn open_notes_screen(config: &NotesConfig) -> NotesScreenHandle {
    NotesScreenHandle::spawn(NotesScreen::new(JsonFileStore::from_config(config)))
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
