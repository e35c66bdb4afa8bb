//! QuickNote terminal front end.
//!
//! # Responsibility
//! - Resolve config, start logging and spawn the notes screen actor.
//! - Map subcommands and shell input to screen actions.
//!
//! # Invariants
//! - Only the empty-note alert is shown to the user; persistence failures go
//!   to the log and surface as a non-zero exit status.

mod render;

use clap::{Parser, Subcommand};
use log::warn;
use quicknote_core::{
    default_log_dir, init_logging, open_notes_screen, AddOutcome, Alert, DeleteOutcome, LogLevel,
    NotesConfig, NotesScreenHandle, ScreenClosed, NOTES_DIR_ENV,
};
use render::{render_alert, render_screen};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const SHELL_DELETE_PREFIX: &str = ":d ";
const SHELL_QUIT: &str = ":q";
const EXIT_OK: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_REJECTED: u8 = 2;

#[derive(Parser)]
#[command(name = "quicknote", version, about = "Minimal persisted note list")]
struct Cli {
    /// Directory holding notes.json.
    #[arg(long, global = true, env = NOTES_DIR_ENV)]
    notes_dir: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "QUICKNOTE_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true, env = "QUICKNOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the screen.
    List,
    /// Add one note.
    Add { text: String },
    /// Delete the note with this id.
    Delete { id: String },
    /// Interactive session (default).
    Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = NotesConfig::resolve(cli.notes_dir.as_deref());
    start_logging(&cli, &config);

    let screen = open_notes_screen(&config);
    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::List => print_screen(&screen).await,
        Command::Add { text } => add_note(&screen, text).await,
        Command::Delete { id } => delete_note(&screen, id).await,
        Command::Shell => run_shell(&screen).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli, config: &NotesConfig) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| LogLevel::default_for_build().as_str().to_string());
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| default_log_dir(config.notes_dir()));
    let log_dir = absolute(&log_dir);

    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("quicknote: logging disabled: {err}");
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

async fn print_screen(screen: &NotesScreenHandle) -> Result<ExitCode, ScreenClosed> {
    let model = screen.render().await?;
    print!("{}", render_screen(&model));
    Ok(ExitCode::SUCCESS)
}

async fn add_note(screen: &NotesScreenHandle, text: String) -> Result<ExitCode, ScreenClosed> {
    let outcome = screen.submit(text).await?;
    match &outcome {
        AddOutcome::Added(note) => println!("{}", note.id),
        AddOutcome::Rejected(alert) => eprintln!("{}", render_alert(alert)),
        AddOutcome::Failed(_) => {}
    }
    Ok(ExitCode::from(add_status(&outcome)))
}

async fn delete_note(screen: &NotesScreenHandle, id: String) -> Result<ExitCode, ScreenClosed> {
    let outcome = screen.delete(id).await?;
    if let DeleteOutcome::Deleted { removed: false } = outcome {
        warn!("event=cli_delete module=cli status=ok removed=false");
    }
    Ok(ExitCode::from(delete_status(&outcome)))
}

/// Process exit status for an add command.
fn add_status(outcome: &AddOutcome) -> u8 {
    match outcome {
        AddOutcome::Added(_) => EXIT_OK,
        AddOutcome::Rejected(_) => EXIT_REJECTED,
        AddOutcome::Failed(_) => EXIT_FAILED,
    }
}

/// Process exit status for a delete command; unknown ids still succeed.
fn delete_status(outcome: &DeleteOutcome) -> u8 {
    match outcome {
        DeleteOutcome::Deleted { .. } => EXIT_OK,
        DeleteOutcome::Failed(_) => EXIT_FAILED,
    }
}

async fn run_shell(screen: &NotesScreenHandle) -> Result<ExitCode, ScreenClosed> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let model = screen.render().await?;
        let frame = format!("{}> ", render_screen(&model));
        // Terminal write failures end the session like EOF.
        if stdout.write_all(frame.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => break,
        };

        match apply_shell_input(screen, parse_shell_input(&line)).await? {
            ShellStep::Quit => break,
            ShellStep::Continue { alert: Some(alert) } => eprintln!("{}", render_alert(&alert)),
            ShellStep::Continue { alert: None } => {}
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, PartialEq, Eq)]
enum ShellStep {
    Quit,
    /// `alert` is set when the line was a blank note.
    Continue { alert: Option<Alert> },
}

async fn apply_shell_input(
    screen: &NotesScreenHandle,
    input: ShellInput,
) -> Result<ShellStep, ScreenClosed> {
    let alert = match input {
        ShellInput::Quit => return Ok(ShellStep::Quit),
        ShellInput::Delete(id) => {
            screen.delete(id).await?;
            None
        }
        ShellInput::Add(text) => match screen.submit(text).await? {
            AddOutcome::Rejected(alert) => Some(alert),
            AddOutcome::Added(_) | AddOutcome::Failed(_) => None,
        },
    };
    Ok(ShellStep::Continue { alert })
}

#[derive(Debug, PartialEq, Eq)]
enum ShellInput {
    Quit,
    Delete(String),
    Add(String),
}

fn parse_shell_input(line: &str) -> ShellInput {
    if line.trim() == SHELL_QUIT {
        return ShellInput::Quit;
    }
    if let Some(id) = line.strip_prefix(SHELL_DELETE_PREFIX) {
        return ShellInput::Delete(id.trim().to_string());
    }
    ShellInput::Add(line.to_string())
}
