//! Coalescing of re-run triggers.
//!
//! The watch loop runs one analysis at a time. Triggers that arrive while a
//! run is in flight collapse into a single follow-up run.

/// Tracks whether a run is in flight and whether another is owed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriggerQueue {
    in_flight: bool,
    pending: bool,
}

impl TriggerQueue {
    /// An idle queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trigger. Returns `true` when the caller should start a run
    /// now; otherwise the trigger is folded into the pending follow-up.
    pub fn trigger(&mut self) -> bool {
        if self.in_flight {
            self.pending = true;
            false
        } else {
            self.in_flight = true;
            true
        }
    }

    /// Mark the current run finished. Returns `true` when a follow-up run
    /// should start immediately; the queue stays in flight in that case.
    pub fn finish(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            self.in_flight = true;
            true
        } else {
            self.in_flight = false;
            false
        }
    }
}
