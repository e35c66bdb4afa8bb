//! FFI use-case API for the Flutter notes screen.
//!
//! # Responsibility
//! - Expose the notes screen actions to Dart via FRB.
//! - Own the process-wide runtime and screen actor behind the sync calls.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All calls reach the same screen actor, so actions are applied in order.
//! - The notes directory is fixed once the screen has started.

use log::error;
use once_cell::sync::OnceCell;
use quicknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_notes_screen,
    ping as ping_inner, AddOutcome, DeleteOutcome, NotesConfig, NotesScreenHandle, ScreenModel,
};
use std::sync::Mutex;
use tokio::runtime::Runtime;

static RUNTIME: OnceCell<Runtime> = OnceCell::new();
static SCREEN: OnceCell<NotesScreenHandle> = OnceCell::new();
static CONFIGURED_DIR: Mutex<Option<NotesConfig>> = Mutex::new(None);
const CONFIG_LOCK_POISONED: &str = "notes_dir configuration lock poisoned";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets the app document directory that holds `notes.json`.
///
/// # FFI contract
/// - Sync call, no file I/O.
/// - Must be called before the first `notes_*` call to take effect.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_notes_dir(notes_dir: String) -> String {
    let config = match NotesConfig::with_notes_dir(&notes_dir) {
        Ok(config) => config,
        Err(err) => return err.to_string(),
    };
    // Screen start reads the config under this same guard.
    let mut slot = match CONFIGURED_DIR.lock() {
        Ok(slot) => slot,
        Err(_) => return CONFIG_LOCK_POISONED.to_string(),
    };
    if SCREEN.get().is_some() {
        return "notes screen already started; notes_dir can no longer change".to_string();
    }
    *slot = Some(config);
    String::new()
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRowView {
    pub id: String,
    pub text: String,
    pub delete_label: String,
}

/// Rendered notes screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesScreenView {
    pub draft: String,
    pub placeholder: String,
    pub add_label: String,
    pub rows: Vec<NoteRowView>,
}

/// Blocking alert to show before anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub title: String,
    pub message: String,
}

/// Response envelope for every screen call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesScreenResponse {
    /// Whether the action took effect.
    pub ok: bool,
    /// Set only for the empty-note case.
    pub alert: Option<AlertView>,
    /// Diagnostic message; not meant for display.
    pub message: String,
    /// Screen after the action; `None` when the screen is unavailable.
    pub screen: Option<NotesScreenView>,
}

/// Renders the current screen, mounting it on first use.
///
/// # FFI contract
/// - Sync call; blocks on the screen actor and may read `notes.json` on the
///   first call.
/// - Never panics.
/// - `ok=true` with `screen` set on success; `ok=false`, `screen=None` when
///   the screen runtime is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_screen_render() -> NotesScreenResponse {
    with_screen(|screen| async move {
        let model = screen.render().await?;
        Ok((true, None, "ok".to_string(), model))
    })
}

/// Mirrors the text input into the draft.
///
/// # FFI contract
/// - Sync call; blocks on the screen actor, performs no file I/O after mount.
/// - Never panics.
/// - Returns the screen with the updated draft.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_set_draft(text: String) -> NotesScreenResponse {
    with_screen(|screen| async move {
        screen.set_draft(text).await?;
        Ok((true, None, "ok".to_string(), screen.render().await?))
    })
}

/// Presses "Add Note".
///
/// # FFI contract
/// - Sync call; blocks until `notes.json` has been rewritten or the write
///   failed.
/// - Never panics.
/// - Blank draft: `ok=false` with `alert` set; nothing is written.
/// - Write failure: `ok=false`, no alert, list and draft unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add() -> NotesScreenResponse {
    with_screen(|screen| async move {
        let (ok, alert, message) = match screen.add().await? {
            AddOutcome::Added(note) => (true, None, format!("Note {} added.", note.id)),
            AddOutcome::Rejected(alert) => (
                false,
                Some(AlertView {
                    title: alert.title,
                    message: alert.message,
                }),
                "Note rejected.".to_string(),
            ),
            AddOutcome::Failed(err) => (false, None, format!("notes_add failed: {err}")),
        };
        Ok((ok, alert, message, screen.render().await?))
    })
}

/// Presses "Delete" on the row with `id`.
///
/// # FFI contract
/// - Sync call; blocks until `notes.json` has been rewritten or the write
///   failed.
/// - Never panics.
/// - Unknown ids succeed and leave the list unchanged.
/// - Write failure: `ok=false`, the row stays in the returned screen.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(id: String) -> NotesScreenResponse {
    with_screen(|screen| async move {
        let (ok, message) = match screen.delete(id).await? {
            DeleteOutcome::Deleted { removed: true } => (true, "Note deleted.".to_string()),
            DeleteOutcome::Deleted { removed: false } => (true, "No such note.".to_string()),
            DeleteOutcome::Failed(err) => (false, format!("notes_delete failed: {err}")),
        };
        Ok((ok, None, message, screen.render().await?))
    })
}

type ScreenCallResult =
    Result<(bool, Option<AlertView>, String, ScreenModel), quicknote_core::ScreenClosed>;

fn with_screen<F, Fut>(call: F) -> NotesScreenResponse
where
    F: FnOnce(NotesScreenHandle) -> Fut,
    Fut: std::future::Future<Output = ScreenCallResult>,
{
    let (runtime, screen) = match ensure_screen() {
        Ok(parts) => parts,
        Err(message) => return unavailable(message),
    };
    match runtime.block_on(call(screen.clone())) {
        Ok((ok, alert, message, model)) => NotesScreenResponse {
            ok,
            alert,
            message,
            screen: Some(to_screen_view(model)),
        },
        Err(err) => {
            error!("event=ffi_screen_call module=ffi status=error error={err}");
            unavailable(err.to_string())
        }
    }
}

fn ensure_screen() -> Result<(&'static Runtime, &'static NotesScreenHandle), String> {
    let runtime = RUNTIME.get_or_try_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("quicknote-screen")
            .enable_all()
            .build()
            .map_err(|err| format!("failed to start notes runtime: {err}"))
    })?;
    if let Some(screen) = SCREEN.get() {
        return Ok((runtime, screen));
    }

    // Held until SCREEN is set so `configure_notes_dir` cannot slip in between.
    let configured = CONFIGURED_DIR
        .lock()
        .map_err(|_| CONFIG_LOCK_POISONED.to_string())?;
    let screen = SCREEN.get_or_init(|| {
        let config = configured
            .clone()
            .unwrap_or_else(|| NotesConfig::resolve(None));
        let _guard = runtime.enter();
        open_notes_screen(&config)
    });
    Ok((runtime, screen))
}

fn unavailable(message: String) -> NotesScreenResponse {
    NotesScreenResponse {
        ok: false,
        alert: None,
        message,
        screen: None,
    }
}

fn to_screen_view(model: ScreenModel) -> NotesScreenView {
    NotesScreenView {
        draft: model.input.value,
        placeholder: model.input.placeholder,
        add_label: model.add_label,
        rows: model
            .rows
            .into_iter()
            .map(|row| NoteRowView {
                id: row.id,
                text: row.text,
                delete_label: row.delete_label,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_notes_dir, core_version, init_logging, notes_add, notes_delete,
        notes_screen_render, notes_set_draft, ping,
    };
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static NOTES_DIR: Lazy<TempDir> = Lazy::new(|| tempfile::tempdir().expect("temp notes dir"));
    // Draft + add pairs must not interleave across parallel tests.
    static SCREEN_LOCK: Mutex<()> = Mutex::new(());

    fn configure_test_dir() {
        let dir = NOTES_DIR.path().to_str().expect("utf-8 temp dir").to_string();
        // Ignored when another test already started the screen on this dir.
        let _ = configure_notes_dir(dir);
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_notes_dir_rejects_blank_dir() {
        assert!(!configure_notes_dir("   ".to_string()).is_empty());
    }

    #[test]
    fn render_exposes_input_and_labels() {
        configure_test_dir();
        let response = notes_screen_render();
        assert!(response.ok, "{}", response.message);
        let screen = response.screen.expect("screen should render");
        assert_eq!(screen.placeholder, "Enter your note");
        assert_eq!(screen.add_label, "Add Note");
    }

    #[test]
    fn add_then_delete_round_trips_through_screen() {
        configure_test_dir();
        let _lock = SCREEN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        let drafted = notes_set_draft("ffi note".to_string());
        assert_eq!(drafted.screen.expect("screen").draft, "ffi note");

        let added = notes_add();
        assert!(added.ok, "{}", added.message);
        let screen = added.screen.expect("screen after add");
        assert_eq!(screen.draft, "");
        let row = screen
            .rows
            .iter()
            .find(|row| row.text == "ffi note")
            .expect("added row")
            .clone();
        assert_eq!(row.delete_label, "Delete");

        let deleted = notes_delete(row.id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        let rows = deleted.screen.expect("screen after delete").rows;
        assert!(rows.iter().all(|other| other.id != row.id));
    }

    #[test]
    fn configure_notes_dir_is_rejected_once_screen_started() {
        configure_test_dir();
        let response = notes_screen_render();
        assert!(response.ok, "{}", response.message);

        let other_dir = tempfile::tempdir().expect("second temp dir should be created");
        let error = configure_notes_dir(
            other_dir
                .path()
                .to_str()
                .expect("temp dir should be valid UTF-8")
                .to_string(),
        );
        assert!(error.contains("already started"), "{error}");

        let configured = super::CONFIGURED_DIR
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
            .expect("test dir should stay configured");
        assert_eq!(configured.notes_dir(), NOTES_DIR.path());
    }

    #[test]
    fn blank_draft_returns_alert() {
        configure_test_dir();
        let _lock = SCREEN_LOCK.lock().unwrap_or_else(|err| err.into_inner());

        notes_set_draft("  ".to_string());
        let response = notes_add();

        assert!(!response.ok);
        let alert = response.alert.expect("alert for blank draft");
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Note cannot be empty");
    }
}
