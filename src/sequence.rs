//! Request sequencing
//!
//! Responses to superseded requests may arrive after newer ones. Each
//! request takes a ticket when it is issued, and its response is applied
//! only if no newer ticket has been applied yet.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket counter with a high-water mark of applied tickets
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next ticket; tickets start at 1
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Marks `ticket` as applied unless a newer one already was.
    ///
    /// Callers must hold the lock of the target they render into, so that
    /// checking and rendering happen as one step.
    pub fn try_apply(&self, ticket: u64) -> bool {
        self.applied
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |applied| {
                (ticket > applied).then_some(ticket)
            })
            .is_ok()
    }
}
