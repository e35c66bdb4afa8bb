//! Notes screen state, rendering and the screen actor.
//!
//! # Responsibility
//! - Own the draft text and the in-memory note list.
//! - Persist every mutation before reflecting it in screen state.
//! - Serialize user actions through one actor task.
//!
//! # Invariants
//! - Initial load runs at most once per screen lifetime.
//! - A failed save leaves draft and list exactly as they were.
//! - Blank drafts never reach the store.

pub mod actor;
pub mod render;
pub mod state;
