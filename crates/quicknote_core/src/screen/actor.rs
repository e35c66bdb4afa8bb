//! Screen actor serializing user actions.
//!
//! One tokio task owns the `NotesScreen` (and through it the store). Front
//! ends hold a cloneable `NotesScreenHandle` and send commands; each command
//! runs to completion before the next is read, so rapid repeated actions
//! always see the list produced by the previous one.

use super::render::ScreenModel;
use super::state::{AddOutcome, DeleteOutcome, NotesScreen};
use crate::model::id::Clock;
use crate::model::note::{Note, NoteId};
use crate::store::NoteStore;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::{mpsc, oneshot};

/// The actor task is gone (runtime shut down or task panicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenClosed;

impl Display for ScreenClosed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notes screen actor is not running")
    }
}

impl Error for ScreenClosed {}

#[derive(Debug)]
enum ScreenCommand {
    Render {
        reply: oneshot::Sender<ScreenModel>,
    },
    Notes {
        reply: oneshot::Sender<Vec<Note>>,
    },
    SetDraft {
        text: String,
        reply: oneshot::Sender<()>,
    },
    Add {
        reply: oneshot::Sender<AddOutcome>,
    },
    Submit {
        text: String,
        reply: oneshot::Sender<AddOutcome>,
    },
    Delete {
        id: NoteId,
        reply: oneshot::Sender<DeleteOutcome>,
    },
}

/// Handle for sending actions to the screen actor.
#[derive(Debug, Clone)]
pub struct NotesScreenHandle {
    sender: mpsc::UnboundedSender<ScreenCommand>,
}

impl NotesScreenHandle {
    /// Spawns the actor on the current tokio runtime.
    ///
    /// The actor mounts the screen before reading its first command.
    pub fn spawn<S, C>(mut screen: NotesScreen<S, C>) -> Self
    where
        S: NoteStore,
        C: Clock + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<ScreenCommand>();

        tokio::spawn(async move {
            screen.mount().await;
            while let Some(command) = rx.recv().await {
                handle_command(&mut screen, command).await;
            }
            debug!("event=screen_actor_stop module=screen status=ok");
        });

        Self { sender: tx }
    }

    /// Returns the current screen model.
    pub async fn render(&self) -> Result<ScreenModel, ScreenClosed> {
        self.request(|reply| ScreenCommand::Render { reply }).await
    }

    /// Returns a copy of the in-memory note list.
    pub async fn notes(&self) -> Result<Vec<Note>, ScreenClosed> {
        self.request(|reply| ScreenCommand::Notes { reply }).await
    }

    /// Replaces the draft text.
    pub async fn set_draft(&self, text: impl Into<String>) -> Result<(), ScreenClosed> {
        let text = text.into();
        self.request(|reply| ScreenCommand::SetDraft { text, reply }).await
    }

    /// Presses "Add Note" with the current draft.
    pub async fn add(&self) -> Result<AddOutcome, ScreenClosed> {
        self.request(|reply| ScreenCommand::Add { reply }).await
    }

    /// Sets the draft and presses "Add Note" as one action.
    pub async fn submit(&self, text: impl Into<String>) -> Result<AddOutcome, ScreenClosed> {
        let text = text.into();
        self.request(|reply| ScreenCommand::Submit { text, reply }).await
    }

    /// Presses "Delete" on the row with `id`.
    pub async fn delete(&self, id: impl Into<NoteId>) -> Result<DeleteOutcome, ScreenClosed> {
        let id = id.into();
        self.request(|reply| ScreenCommand::Delete { id, reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ScreenCommand,
    ) -> Result<T, ScreenClosed> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.sender.send(build(reply_tx)).is_err() {
            error!("event=screen_request module=screen status=error error_code=actor_closed");
            return Err(ScreenClosed);
        }
        reply_rx.await.map_err(|_| ScreenClosed)
    }
}

async fn handle_command<S: NoteStore, C: Clock>(
    screen: &mut NotesScreen<S, C>,
    command: ScreenCommand,
) {
    // Callers that dropped their reply receiver no longer care about the result.
    match command {
        ScreenCommand::Render { reply } => {
            let _ = reply.send(screen.render());
        }
        ScreenCommand::Notes { reply } => {
            let _ = reply.send(screen.notes().to_vec());
        }
        ScreenCommand::SetDraft { text, reply } => {
            screen.set_draft(text);
            let _ = reply.send(());
        }
        ScreenCommand::Add { reply } => {
            let outcome = screen.add().await;
            let _ = reply.send(outcome);
        }
        ScreenCommand::Submit { text, reply } => {
            screen.set_draft(text);
            let outcome = screen.add().await;
            let _ = reply.send(outcome);
        }
        ScreenCommand::Delete { id, reply } => {
            let outcome = screen.delete(&id).await;
            let _ = reply.send(outcome);
        }
    }
}
