//! Job (process) model.
//!
//! A job is one simulated process: an immutable identity (name, arrival,
//! burst) plus the mutable counters the tick engine updates while the
//! simulation runs.

use serde::{Deserialize, Serialize};

use super::Tick;

/// A job submitted to the simulated CPU.
///
/// # Time Representation
/// All times are in ticks relative to the start of the run (t=0).
///
/// # Invariants
/// - `0 <= remaining_burst <= burst`
/// - `completion_tick` is set at most once, when `remaining_burst` reaches 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Identifier. Not required to be unique.
    pub name: String,
    /// Tick at which the job becomes eligible to run.
    pub arrival: Tick,
    /// Total ticks of execution required.
    pub burst: Tick,
    /// Ticks of execution still owed.
    #[serde(default)]
    pub remaining_burst: Tick,
    /// Ticks spent eligible but not selected.
    #[serde(default)]
    pub wait: Tick,
    /// Tick at which `remaining_burst` reached 0. `None` = not finished.
    #[serde(default)]
    pub completion_tick: Option<Tick>,
}

impl Job {
    /// Creates a fresh job with full remaining burst.
    pub fn new(name: impl Into<String>, arrival: Tick, burst: Tick) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            remaining_burst: burst,
            wait: 0,
            completion_tick: None,
        }
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival: Tick) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the burst (and resets the remaining burst to match).
    pub fn with_burst(mut self, burst: Tick) -> Self {
        self.burst = burst;
        self.remaining_burst = burst;
        self
    }

    /// Whether the job has arrived by tick `t` and still needs the CPU.
    #[inline]
    pub fn is_eligible(&self, t: Tick) -> bool {
        self.arrival <= t && self.remaining_burst > 0
    }

    /// Whether all work is done.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_burst == 0
    }

    /// Ticks this job has been the selected runner.
    #[inline]
    pub fn ran(&self) -> Tick {
        self.burst - self.remaining_burst
    }

    /// Ticks between arrival and completion, once completed.
    pub fn turnaround(&self) -> Option<Tick> {
        self.completion_tick.map(|done| done - self.arrival)
    }

    /// Consumes one tick of execution.
    ///
    /// # Panics
    /// If the job has no remaining burst.
    pub(crate) fn execute_tick(&mut self) {
        assert!(
            self.remaining_burst > 0,
            "job '{}' selected with no remaining burst",
            self.name
        );
        self.remaining_burst -= 1;
    }

    /// Records completion at tick `t`.
    pub(crate) fn complete(&mut self, t: Tick) {
        debug_assert!(self.is_finished(), "job '{}' completed early", self.name);
        debug_assert!(
            self.completion_tick.is_none(),
            "job '{}' completed twice",
            self.name
        );
        self.completion_tick = Some(t);
    }

    /// Discards simulation state, keeping identity.
    pub(crate) fn reset(&mut self) {
        self.remaining_burst = self.burst;
        self.wait = 0;
        self.completion_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new("A", 0, 5).with_arrival(3).with_burst(7);
        assert_eq!(job.name, "A");
        assert_eq!(job.arrival, 3);
        assert_eq!(job.burst, 7);
        assert_eq!(job.remaining_burst, 7);
        assert_eq!(job.wait, 0);
        assert_eq!(job.completion_tick, None);
    }

    #[test]
    fn test_job_eligibility() {
        let job = Job::new("A", 2, 1);
        assert!(!job.is_eligible(1));
        assert!(job.is_eligible(2));
        assert!(job.is_eligible(10));

        let empty = Job::new("Z", 0, 0);
        assert!(!empty.is_eligible(0));
        assert!(empty.is_finished());
    }

    #[test]
    fn test_job_execution_and_turnaround() {
        let mut job = Job::new("A", 1, 2);
        job.execute_tick();
        assert_eq!(job.ran(), 1);
        assert_eq!(job.turnaround(), None);
        job.execute_tick();
        assert!(job.is_finished());
        job.complete(4);
        assert_eq!(job.turnaround(), Some(3));
    }

    #[test]
    #[should_panic(expected = "no remaining burst")]
    fn test_job_execute_finished_panics() {
        let mut job = Job::new("A", 0, 0);
        job.execute_tick();
    }

    #[test]
    fn test_job_reset() {
        let mut job = Job::new("A", 0, 1);
        job.wait = 4;
        job.execute_tick();
        job.complete(5);
        job.reset();
        assert_eq!(job, Job::new("A", 0, 1));
    }
}
