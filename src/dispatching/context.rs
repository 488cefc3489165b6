//! Per-tick view handed to selection policies.

use crate::models::{JobCursor, JobIndex, JobSet, ReadyQueue, Tick};

/// Read-only snapshot of engine state at one tick.
///
/// Policies inspect this and return a choice; they never mutate the
/// job set or the ready queue.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Current tick.
    pub tick: Tick,
    /// All jobs of the run, in set order.
    pub jobs: &'a JobSet,
    /// Job holding the CPU going into this tick's selection.
    pub running: Option<JobIndex>,
    /// Cursor positioned on the most recent selection.
    pub cursor: JobCursor,
    /// Ready queue, for policies that keep one.
    pub ready: Option<&'a ReadyQueue>,
}

impl<'a> TickContext<'a> {
    /// Creates a context at tick `tick` with nothing running.
    pub fn at_tick(tick: Tick, jobs: &'a JobSet) -> Self {
        Self {
            tick,
            jobs,
            running: None,
            cursor: JobCursor::new(jobs.len()),
            ready: None,
        }
    }

    /// Sets the running job.
    pub fn with_running(mut self, running: Option<JobIndex>) -> Self {
        self.running = running;
        self
    }

    /// Sets the cursor.
    pub fn with_cursor(mut self, cursor: JobCursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Attaches a ready queue.
    pub fn with_ready(mut self, ready: &'a ReadyQueue) -> Self {
        self.ready = Some(ready);
        self
    }
}
