//! Trailing-edge debounce for resize events.
//!
//! Every [`Debouncer::schedule`] pushes the deadline out to `now + quiet`.
//! [`Debouncer::fire`] reports true once, after the deadline passes with no
//! further scheduling. Time is passed in rather than read from the clock so
//! the page stays deterministic.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Record an event at `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True if the pending event's quiet period has elapsed by `now`.
    /// Clears the pending event when it fires.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
