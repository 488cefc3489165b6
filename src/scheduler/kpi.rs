//! Per-job metrics and run-level indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Wait | Ticks eligible but not selected |
//! | Turnaround | completion - arrival |
//! | Utilization | busy ticks / run_for |
//! | Throughput | completed jobs / run_for |
//! | Context switches | Number of `selected` events |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::{Event, EventKind};
use crate::models::{Job, JobSet, Tick};

/// Final accounting for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetrics {
    /// Job name.
    pub name: String,
    /// Arrival tick.
    pub arrival: Tick,
    /// Total burst.
    pub burst: Tick,
    /// Ticks spent eligible but not running.
    pub wait: Tick,
    /// Completion tick. `None` = unfinished at run end.
    pub completion: Option<Tick>,
    /// `completion - arrival`. `None` = unfinished at run end.
    pub turnaround: Option<Tick>,
}

impl JobMetrics {
    /// Snapshot of a job's counters.
    pub fn from_job(job: &Job) -> Self {
        Self {
            name: job.name.clone(),
            arrival: job.arrival,
            burst: job.burst,
            wait: job.wait,
            completion: job.completion_tick,
            turnaround: job.turnaround(),
        }
    }
}

/// Run-level performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    /// Jobs in the run.
    pub total_jobs: usize,
    /// Jobs that finished within `run_for`.
    pub completed_jobs: usize,
    /// Mean wait over jobs that arrived within the run.
    pub avg_wait: f64,
    /// Mean turnaround over completed jobs.
    pub avg_turnaround: f64,
    /// Ticks the CPU executed a job.
    pub busy_ticks: Tick,
    /// Ticks with no outstanding work.
    pub idle_ticks: Tick,
    /// busy / run_for (0.0..1.0).
    pub utilization: f64,
    /// Completed jobs per tick.
    pub throughput: f64,
    /// Number of selection events.
    pub context_switches: usize,
}

impl RunKpi {
    /// Computes indicators from final job state and the trace.
    pub fn calculate(jobs: &JobSet, events: &[Event], run_for: Tick) -> Self {
        let mut completed: usize = 0;
        let mut total_turnaround: f64 = 0.0;
        let mut arrived: usize = 0;
        let mut total_wait: f64 = 0.0;
        let mut busy: Tick = 0;

        for job in jobs {
            busy += job.ran();
            if job.arrival <= run_for {
                arrived += 1;
                total_wait += f64::from(job.wait);
            }
            if let Some(turnaround) = job.turnaround() {
                completed += 1;
                total_turnaround += f64::from(turnaround);
            }
        }

        let idle_ticks = events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Idle))
            .count() as Tick;
        let context_switches = events.iter().filter(|e| e.is_selection()).count();

        let per_tick = |value: f64| {
            if run_for == 0 {
                0.0
            } else {
                value / f64::from(run_for)
            }
        };

        Self {
            total_jobs: jobs.len(),
            completed_jobs: completed,
            avg_wait: if arrived == 0 {
                0.0
            } else {
                total_wait / arrived as f64
            },
            avg_turnaround: if completed == 0 {
                0.0
            } else {
                total_turnaround / completed as f64
            },
            busy_ticks: busy,
            idle_ticks,
            utilization: per_tick(f64::from(busy)),
            throughput: per_tick(completed as f64),
            context_switches,
        }
    }

    /// Whether every job finished within the run.
    pub fn all_completed(&self) -> bool {
        self.completed_jobs == self.total_jobs
    }
}
