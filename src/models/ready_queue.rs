//! Bounded FIFO of ready jobs for round-robin.

use std::collections::VecDeque;

use super::JobIndex;

/// A bounded circular queue of job indices.
///
/// Capacity equals the job set size and each job may be queued at most
/// once, so the queue can never overflow in a correct run. Both
/// conditions are asserted.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    slots: VecDeque<JobIndex>,
    queued: Vec<bool>,
}

impl ReadyQueue {
    /// Creates an empty queue for a job set of `capacity` jobs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: VecDeque::with_capacity(capacity),
            queued: vec![false; capacity],
        }
    }

    /// Maximum number of queued jobs.
    pub fn capacity(&self) -> usize {
        self.queued.len()
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no job is queued.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `job` is currently queued.
    pub fn contains(&self, job: JobIndex) -> bool {
        self.queued.get(job).copied().unwrap_or(false)
    }

    /// Appends `job` at the back.
    ///
    /// # Panics
    /// If `job` is out of range or already queued.
    pub fn enqueue(&mut self, job: JobIndex) {
        assert!(
            job < self.capacity(),
            "job {job} out of range for ready queue of capacity {}",
            self.capacity()
        );
        assert!(!self.queued[job], "job {job} already in ready queue");
        self.queued[job] = true;
        self.slots.push_back(job);
    }

    /// The job at the front, without removing it.
    pub fn peek_front(&self) -> Option<JobIndex> {
        self.slots.front().copied()
    }

    /// Removes and returns the job at the front.
    pub fn dequeue(&mut self) -> Option<JobIndex> {
        let job = self.slots.pop_front()?;
        self.queued[job] = false;
        Some(job)
    }

    /// Moves the front job to the back. Returns the moved job.
    ///
    /// The engine does not call this: a running job is held outside the
    /// queue, so quantum expiry is an [`enqueue`](Self::enqueue) of the
    /// runner followed by a [`dequeue`](Self::dequeue) of the next one.
    pub fn rotate(&mut self) -> Option<JobIndex> {
        let job = self.slots.pop_front()?;
        self.slots.push_back(job);
        Some(job)
    }

    /// Queued jobs, front to back.
    pub fn iter(&self) -> impl Iterator<Item = JobIndex> + '_ {
        self.slots.iter().copied()
    }
}
