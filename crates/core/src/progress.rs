//! Lightweight progress reporting for long-running harvests.
//!
//! Frontends implement [`Progress`] to surface run status to users; the
//! engine calls it from the convergence loop and the extraction pass. Every
//! hook has an empty default body, so implementations override only what
//! they render.

use crate::exhibitor::Exhibitor;

/// Observer hooks invoked while a harvest runs.
pub trait Progress: Send {
    /// Called after each scroll probe with the current rendered-card count.
    fn probe(&mut self, _round: u32, _cards: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when a record is accepted into the result set.
    fn accepted(&mut self, _record: &Exhibitor) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
