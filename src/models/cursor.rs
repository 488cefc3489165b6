//! Rotating cursor over a job set.

use super::JobIndex;

/// Remembers the most recently selected job and yields search orders
/// that start just after it and wrap around.
///
/// Replaces `(last + offset) % len` arithmetic with a type that cannot
/// go negative or skip an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobCursor {
    last: Option<JobIndex>,
    len: usize,
}

impl JobCursor {
    /// Cursor over `len` jobs with no previous selection.
    pub fn new(len: usize) -> Self {
        Self { last: None, len }
    }

    /// The most recently selected job.
    pub fn last(&self) -> Option<JobIndex> {
        self.last
    }

    /// Moves the cursor onto `index`.
    ///
    /// # Panics
    /// If `index` is outside the job set.
    pub fn move_to(&mut self, index: JobIndex) {
        assert!(
            index < self.len,
            "cursor index {index} out of range for {} jobs",
            self.len
        );
        self.last = Some(index);
    }

    /// Every index exactly once, beginning after the last selection.
    ///
    /// With no previous selection the order is `0..len`.
    pub fn rotation(&self) -> impl Iterator<Item = JobIndex> {
        let len = self.len;
        let start = self.last.map_or(0, |last| last + 1);
        (0..len).map(move |offset| (start + offset) % len)
    }
}
