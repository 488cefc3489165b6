//! Debug-build invariant checks run once per tick.

use crate::models::{JobIndex, JobSet, ReadyQueue, Tick};

/// Checks engine state after arrivals and completions have been
/// processed for a tick, before selection.
///
/// All checks are `debug_assert!`s; release builds only count ticks.
#[derive(Debug, Default)]
pub struct Observer {
    ticks: u64,
}

impl Observer {
    /// Creates an observer that has seen no ticks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks observed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Checks the state at tick `t`.
    pub fn observe(
        &mut self,
        t: Tick,
        jobs: &JobSet,
        running: Option<JobIndex>,
        ready: Option<&ReadyQueue>,
    ) {
        self.ticks += 1;

        for job in jobs {
            debug_assert!(
                job.remaining_burst <= job.burst,
                "job '{}' remaining {} exceeds burst {}",
                job.name,
                job.remaining_burst,
                job.burst
            );

            if job.arrival > t {
                debug_assert!(
                    job.wait == 0 && job.ran() == 0,
                    "job '{}' accrued time before arrival",
                    job.name
                );
                continue;
            }

            // Every tick since arrival is credited as exactly one of run or wait.
            match job.completion_tick {
                Some(done) => debug_assert_eq!(
                    job.wait + job.burst,
                    done - job.arrival,
                    "job '{}' wait/run credit does not match turnaround",
                    job.name
                ),
                None => debug_assert_eq!(
                    job.wait + job.ran(),
                    t - job.arrival,
                    "job '{}' wait/run credit does not match elapsed ticks",
                    job.name
                ),
            }
            debug_assert_eq!(
                job.completion_tick.is_some(),
                job.is_finished(),
                "job '{}' completion tick out of sync with remaining burst",
                job.name
            );
        }

        if let Some(running) = running {
            debug_assert!(
                jobs[running].is_eligible(t),
                "running job '{}' is not eligible at {t}",
                jobs[running].name
            );
        }

        if let Some(ready) = ready {
            for queued in ready.iter() {
                debug_assert_ne!(
                    Some(queued),
                    running,
                    "running job must not appear in the ready queue"
                );
                debug_assert!(
                    jobs[queued].is_eligible(t),
                    "queued job '{}' is not eligible at {t}",
                    jobs[queued].name
                );
            }
        }
    }
}
