//! Flutter-facing bindings for QuickNote.

pub mod api;
