//! Built-in selection policies.
//!
//! | Policy | Preemptive | Re-evaluated | Candidate order |
//! |--------|-----------|--------------|-----------------|
//! | FCFS | no | when CPU free | job set order |
//! | SJF | yes | every tick | smallest remaining burst, then set order |
//! | RR | on quantum expiry | when CPU free | ready queue FIFO |
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", §5.3

use std::num::NonZeroU32;

use super::{SelectionPolicy, TickContext};
use crate::models::JobIndex;

/// First-Come First-Served.
///
/// Keeps the running job until it finishes. When the CPU is free, picks
/// the first eligible job scanning from just after the previous
/// selection. Earlier jobs in set order have all finished by then, so
/// this is the first eligible job in arrival order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SelectionPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn description(&self) -> &'static str {
        "First-Come First-Served"
    }

    fn select(&self, context: &TickContext<'_>) -> Option<JobIndex> {
        if let Some(running) = context.running {
            return Some(running);
        }
        context
            .cursor
            .rotation()
            .find(|&i| context.jobs[i].is_eligible(context.tick))
    }
}

/// Shortest Job First, preemptive (shortest remaining time).
///
/// Re-evaluated every tick over all eligible jobs; a strictly shorter
/// arrival preempts the running job. Ties go to the earlier job in set
/// order, which keeps the incumbent when it is first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SelectionPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn description(&self) -> &'static str {
        "preemptive Shortest Job First"
    }

    fn reevaluates_every_tick(&self) -> bool {
        true
    }

    fn select(&self, context: &TickContext<'_>) -> Option<JobIndex> {
        // min_by_key keeps the first of equal minima
        context
            .jobs
            .eligible_at(context.tick)
            .min_by_key(|&i| context.jobs[i].remaining_burst)
    }
}

/// Round-Robin with a fixed quantum.
///
/// Serves the ready queue front to back. The engine requeues a job at
/// the back when its slice expires unfinished.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: NonZeroU32,
}

impl RoundRobin {
    /// Creates a round-robin policy.
    pub fn new(quantum: NonZeroU32) -> Self {
        Self { quantum }
    }

    /// The configured quantum.
    pub fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }
}

impl SelectionPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn description(&self) -> &'static str {
        "Round-Robin"
    }

    fn time_slice(&self) -> Option<NonZeroU32> {
        Some(self.quantum)
    }

    fn select(&self, context: &TickContext<'_>) -> Option<JobIndex> {
        context
            .running
            .or_else(|| context.ready.and_then(|ready| ready.peek_front()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, JobCursor, JobSet, ReadyQueue};

    fn jobs(specs: &[(&str, u32, u32)]) -> JobSet {
        JobSet::new(
            specs
                .iter()
                .map(|&(name, arrival, burst)| Job::new(name, arrival, burst)),
        )
    }

    #[test]
    fn test_fcfs_keeps_running_job() {
        let set = jobs(&[("A", 0, 5), ("B", 0, 1)]);
        let ctx = TickContext::at_tick(1, &set).with_running(Some(0));
        assert_eq!(Fcfs.select(&ctx), Some(0));
    }

    #[test]
    fn test_fcfs_picks_first_arrival() {
        let set = jobs(&[("late", 2, 1), ("early", 0, 9), ("mid", 1, 1)]);
        let ctx = TickContext::at_tick(2, &set);
        assert_eq!(set[Fcfs.select(&ctx).unwrap()].name, "early");
    }

    #[test]
    fn test_fcfs_skips_unarrived_and_finished() {
        let mut set = jobs(&[("A", 0, 1), ("B", 1, 1), ("C", 5, 1)]);
        set[0].remaining_burst = 0;

        let mut cursor = JobCursor::new(set.len());
        cursor.move_to(0);
        let ctx = TickContext::at_tick(3, &set).with_cursor(cursor);
        assert_eq!(Fcfs.select(&ctx), Some(1));

        set[1].remaining_burst = 0;
        let ctx = TickContext::at_tick(3, &set).with_cursor(cursor);
        assert_eq!(Fcfs.select(&ctx), None);
    }

    #[test]
    fn test_fcfs_cursor_scan_matches_set_order() {
        // After finishing job 1, jobs 0..=1 are done; rotation from 2
        // must agree with a plain scan.
        let mut set = jobs(&[("A", 0, 1), ("B", 0, 1), ("C", 0, 1), ("D", 0, 1)]);
        set[0].remaining_burst = 0;
        set[1].remaining_burst = 0;

        let mut cursor = JobCursor::new(set.len());
        cursor.move_to(1);
        let ctx = TickContext::at_tick(2, &set).with_cursor(cursor);
        assert_eq!(Fcfs.select(&ctx), set.eligible_at(2).next());
    }

    #[test]
    fn test_sjf_picks_shortest_remaining() {
        let mut set = jobs(&[("A", 0, 5), ("B", 1, 3)]);
        set[0].remaining_burst = 4;
        let ctx = TickContext::at_tick(1, &set).with_running(Some(0));
        assert_eq!(Sjf.select(&ctx), Some(1));
    }

    #[test]
    fn test_sjf_tie_goes_to_set_order() {
        let set = jobs(&[("A", 0, 3), ("B", 0, 3), ("C", 0, 3)]);
        let ctx = TickContext::at_tick(0, &set).with_running(Some(2));
        assert_eq!(Sjf.select(&ctx), Some(0));
    }

    #[test]
    fn test_sjf_ignores_future_jobs() {
        let set = jobs(&[("A", 0, 9), ("B", 4, 1)]);
        let ctx = TickContext::at_tick(3, &set);
        assert_eq!(Sjf.select(&ctx), Some(0));
    }

    #[test]
    fn test_round_robin_serves_queue_front() {
        let set = jobs(&[("A", 0, 5), ("B", 0, 5)]);
        let mut ready = ReadyQueue::with_capacity(set.len());
        ready.enqueue(1);
        ready.enqueue(0);

        let rr = RoundRobin::new(NonZeroU32::new(2).unwrap());
        let ctx = TickContext::at_tick(0, &set).with_ready(&ready);
        assert_eq!(rr.select(&ctx), Some(1));

        let ctx = ctx.with_running(Some(0));
        assert_eq!(rr.select(&ctx), Some(0));
    }

    #[test]
    fn test_round_robin_empty_queue() {
        let set = jobs(&[("A", 3, 1)]);
        let ready = ReadyQueue::with_capacity(set.len());
        let rr = RoundRobin::new(NonZeroU32::new(1).unwrap());
        let ctx = TickContext::at_tick(0, &set).with_ready(&ready);
        assert_eq!(rr.select(&ctx), None);
        assert_eq!(rr.quantum().get(), 1);
    }
}
