//! Tick-driven simulation engine.
//!
//! # Algorithm
//!
//! For each tick `t` in `0..=run_for`:
//! 1. Credit one tick of wait to every job that was eligible during
//!    `t - 1` but did not run, then emit arrivals for `t`.
//! 2. Retire the running job if the previous tick drained its burst.
//! 3. If every arrived job has finished, the CPU idles.
//! 4. Otherwise preempt on quantum expiry, consult the policy when the
//!    CPU is free (or on every tick for re-evaluating policies), and run
//!    the chosen job for one tick.
//!
//! Tick `run_for` only performs steps 1-2; it never starts new work.
//!
//! # Complexity
//! O(n) per tick for n jobs, O(n * run_for) per run.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use super::{Event, EventKind, Observer, RunKpi};
use crate::dispatching::{Algorithm, SelectionPolicy, TickContext};
use crate::models::{JobCursor, JobIndex, JobSet, ReadyQueue, Tick};
use crate::report::SimulationReport;

/// Run-level parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Last tick simulated (inclusive).
    pub run_for: Tick,
    /// Scheduling discipline.
    pub algorithm: Algorithm,
}

impl RunParameters {
    /// Creates run parameters.
    pub fn new(run_for: Tick, algorithm: Algorithm) -> Self {
        Self { run_for, algorithm }
    }
}

/// One simulation run over a fixed job set.
///
/// # Example
///
/// ```
/// use u_cpusched::dispatching::Algorithm;
/// use u_cpusched::models::{Job, JobSet};
/// use u_cpusched::scheduler::{RunParameters, Simulation};
///
/// let jobs = JobSet::new(vec![Job::new("A", 0, 5), Job::new("B", 1, 3)]);
/// let report = Simulation::new(jobs, RunParameters::new(8, Algorithm::Fcfs)).run();
///
/// assert_eq!(report.metrics[0].wait, 0);
/// assert_eq!(report.metrics[0].turnaround, Some(5));
/// assert_eq!(report.metrics[1].wait, 4);
/// assert_eq!(report.metrics[1].turnaround, Some(7));
/// ```
#[derive(Debug)]
pub struct Simulation {
    jobs: JobSet,
    params: RunParameters,
    policy: Box<dyn SelectionPolicy>,
    ready: Option<ReadyQueue>,
    cursor: JobCursor,
    /// Job holding the CPU across the tick boundary.
    running: Option<JobIndex>,
    /// Job that executed during the previous tick.
    previous: Option<JobIndex>,
    slice_left: Tick,
    arrived: usize,
    finished: usize,
    next_tick: Tick,
    done: bool,
    events: Vec<Event>,
    observer: Observer,
}

impl Simulation {
    /// Prepares a run. The job set's counters are expected fresh, as
    /// produced by [`JobSet::new`].
    pub fn new(jobs: JobSet, params: RunParameters) -> Self {
        let policy = params.algorithm.policy();
        let ready = policy
            .time_slice()
            .map(|_| ReadyQueue::with_capacity(jobs.len()));

        log::debug!(
            "[Sim] {} jobs, run_for {}, using {}",
            jobs.len(),
            params.run_for,
            policy.description()
        );
        for job in jobs.iter().filter(|job| job.arrival > params.run_for) {
            log::warn!(
                "[Sim] job '{}' arrives at {} after the run ends at {}",
                job.name,
                job.arrival,
                params.run_for
            );
        }

        Self {
            cursor: JobCursor::new(jobs.len()),
            jobs,
            params,
            policy,
            ready,
            running: None,
            previous: None,
            slice_left: 0,
            arrived: 0,
            finished: 0,
            next_tick: 0,
            done: false,
            events: Vec::new(),
            observer: Observer::new(),
        }
    }

    /// Run parameters.
    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    /// Current job state.
    pub fn jobs(&self) -> &JobSet {
        &self.jobs
    }

    /// Job that executed during the most recent tick.
    pub fn running(&self) -> Option<JobIndex> {
        self.previous
    }

    /// Ready queue, for round-robin runs.
    pub fn ready_queue(&self) -> Option<&ReadyQueue> {
        self.ready.as_ref()
    }

    /// Trace so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Invariant checker.
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Whether tick `run_for` has been processed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one tick and returns the events it produced, or `None`
    /// once the run is over.
    pub fn step(&mut self) -> Option<&[Event]> {
        if self.done {
            return None;
        }

        let t = self.next_tick;
        let first = self.events.len();

        let instant = self.scan_arrivals(t);
        self.retire_finished(t, instant);
        self.observer
            .observe(t, &self.jobs, self.running, self.ready.as_ref());

        if t < self.params.run_for {
            if self.arrived == self.finished {
                self.idle(t);
            } else {
                self.dispatch(t);
            }
            self.next_tick = t + 1;
        } else {
            self.done = true;
            log::debug!(
                "[Sim] finished at {}: {}/{} jobs completed",
                t,
                self.finished,
                self.jobs.len()
            );
        }

        Some(&self.events[first..])
    }

    /// Runs to completion and builds the report.
    pub fn run(mut self) -> SimulationReport {
        while self.step().is_some() {}
        self.into_report()
    }

    /// Builds the report from the current state.
    pub fn into_report(self) -> SimulationReport {
        let kpi = RunKpi::calculate(&self.jobs, &self.events, self.params.run_for);
        SimulationReport::new(self.params, &self.jobs, self.events, kpi)
    }

    /// Step 1: wait accrual and arrivals. Returns zero-burst arrivals,
    /// which complete immediately.
    fn scan_arrivals(&mut self, t: Tick) -> Vec<JobIndex> {
        let previous = self.previous;
        for (i, job) in self.jobs.iter_mut().enumerate() {
            if job.arrival < t && job.remaining_burst > 0 && previous != Some(i) {
                job.wait += 1;
            }
        }

        let arriving: Vec<JobIndex> = self.jobs.arriving_at(t).collect();
        let mut instant = Vec::new();
        for i in arriving {
            self.arrived += 1;
            let job = self.jobs[i].name.clone();
            self.emit(t, EventKind::Arrived { job });
            if self.jobs[i].is_finished() {
                instant.push(i);
            } else if let Some(ready) = self.ready.as_mut() {
                ready.enqueue(i);
            }
        }
        instant
    }

    /// Step 2: completion of the running job and of zero-burst arrivals.
    fn retire_finished(&mut self, t: Tick, instant: Vec<JobIndex>) {
        let drained = self
            .running
            .filter(|&i| self.jobs[i].is_finished())
            .into_iter();
        for i in drained.chain(instant) {
            self.jobs[i].complete(t);
            self.finished += 1;
            if self.running == Some(i) {
                self.running = None;
            }
            let job = self.jobs[i].name.clone();
            self.emit(t, EventKind::Finished { job });
        }
    }

    /// Step 3: nothing outstanding.
    fn idle(&mut self, t: Tick) {
        self.previous = None;
        self.emit(t, EventKind::Idle);
    }

    /// Step 4: selection and one tick of execution.
    fn dispatch(&mut self, t: Tick) {
        if let (Some(i), Some(ready)) = (self.running, self.ready.as_mut()) {
            if self.slice_left == 0 {
                log::debug!("[Sim] t={t} quantum expired for '{}'", self.jobs[i].name);
                ready.enqueue(i);
                self.running = None;
            }
        }

        let choice = match self.running {
            Some(i) if !self.policy.reevaluates_every_tick() => Some(i),
            _ => {
                let mut context = TickContext::at_tick(t, &self.jobs)
                    .with_running(self.running)
                    .with_cursor(self.cursor);
                if let Some(ready) = self.ready.as_ref() {
                    context = context.with_ready(ready);
                }
                self.policy.select(&context)
            }
        };

        let Some(i) = choice else {
            self.idle(t);
            return;
        };
        assert!(
            self.jobs[i].is_eligible(t),
            "{} selected ineligible job '{}' at {t}",
            self.policy.name(),
            self.jobs[i].name
        );

        if self.running != Some(i) {
            if let Some(ready) = self.ready.as_mut() {
                let front = ready.dequeue();
                debug_assert_eq!(front, Some(i), "queued policy must take the front job");
            }
            self.slice_left = slice_for(self.jobs[i].remaining_burst, self.policy.time_slice());
            self.running = Some(i);
            self.cursor.move_to(i);
        }

        if self.previous != Some(i) {
            let job = self.jobs[i].name.clone();
            let burst = self.jobs[i].remaining_burst;
            log::debug!("[Sim] t={t} selected '{job}' (remaining {burst})");
            self.emit(t, EventKind::Selected { job, burst });
        }
        self.previous = Some(i);

        self.jobs[i].execute_tick();
        self.slice_left = self.slice_left.saturating_sub(1);
    }

    fn emit(&mut self, t: Tick, kind: EventKind) {
        let event = Event::new(t, kind);
        log::trace!("[Sim] {event}");
        self.events.push(event);
    }
}

/// Ticks granted to a fresh selection: the whole remaining burst, or at
/// most one quantum.
fn slice_for(remaining: Tick, quantum: Option<NonZeroU32>) -> Tick {
    match quantum {
        Some(q) => remaining.min(q.get()),
        None => remaining,
    }
}
