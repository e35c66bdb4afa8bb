//! Time-derived note id generation.
//!
//! # Invariants
//! - Ids are decimal epoch milliseconds.
//! - Ids issued by one generator are strictly increasing, even when the clock
//!   repeats a millisecond or steps backwards.
//! - Once the numeric range is exhausted, ids continue as `<u64::MAX>-<n>`
//!   with `n` increasing; such ids are recognized by `observe`, so they are
//!   never reissued after a restart.

use super::note::NoteId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond clock used by the id generator.
pub trait Clock: Send {
    fn now_millis(&self) -> u64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Issues unique note ids from a millisecond clock.
#[derive(Debug)]
pub struct NoteIdGenerator<C: Clock = SystemClock> {
    clock: C,
    last: u64,
    /// Last suffix issued after `last` reached `u64::MAX`.
    overflow: u64,
}

impl Default for NoteIdGenerator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> NoteIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: 0,
            overflow: 0,
        }
    }

    /// Returns the next id.
    pub fn next_id(&mut self) -> NoteId {
        let now = self.clock.now_millis();
        let next = if now > self.last {
            Some(now)
        } else {
            self.last.checked_add(1)
        };
        match next {
            Some(value) => {
                self.last = value;
                value.to_string()
            }
            None => {
                self.overflow = self.overflow.saturating_add(1);
                format!("{}-{}", u64::MAX, self.overflow)
            }
        }
    }

    /// Moves the generator past every generated-shape id in `existing`.
    ///
    /// Other ids (hand-edited documents) are ignored.
    pub fn observe<'a>(&mut self, existing: impl IntoIterator<Item = &'a NoteId>) {
        for id in existing {
            if let Ok(value) = id.parse::<u64>() {
                self.last = self.last.max(value);
            } else if let Some(suffix) = overflow_suffix(id) {
                self.last = u64::MAX;
                self.overflow = self.overflow.max(suffix);
            }
        }
    }
}

fn overflow_suffix(id: &str) -> Option<u64> {
    let (base, suffix) = id.split_once('-')?;
    if base.parse::<u64>().ok()? != u64::MAX {
        return None;
    }
    suffix.parse::<u64>().ok()
}
