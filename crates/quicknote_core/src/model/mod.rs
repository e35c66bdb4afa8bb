//! Domain model for the notes screen.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, screen and front ends.
//! - Generate stable, time-derived note identifiers.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that is never reused.
//! - Notes are immutable after creation; removal is a hard delete.

pub mod id;
pub mod note;
