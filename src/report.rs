//! Simulation report: the trace plus final metrics.
//!
//! The `Display` implementation renders the line-oriented text format.
//! Given the same inputs the output is byte-for-byte identical:
//!
//! ```text
//! 2 processes
//! Using First-Come First-Served
//!
//! Time 0: A arrived
//! Time 0: A selected (burst 5)
//! Time 1: B arrived
//! Time 5: A finished
//! Time 5: B selected (burst 3)
//! Time 8: B finished
//! Finished at time 8
//!
//! A wait 0 turnaround 5
//! B wait 4 turnaround 7
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dispatching::Algorithm;
use crate::models::{JobSet, Tick};
use crate::scheduler::{Event, JobMetrics, RunKpi, RunParameters};

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Number of jobs.
    pub job_count: usize,
    /// Scheduling discipline.
    pub algorithm: Algorithm,
    /// Last simulated tick.
    pub run_for: Tick,
    /// Trace in tick order.
    pub events: Vec<Event>,
    /// Per-job metrics in job set order.
    pub metrics: Vec<JobMetrics>,
    /// Run-level indicators.
    pub kpi: RunKpi,
}

impl SimulationReport {
    /// Assembles a report from final run state.
    pub fn new(params: RunParameters, jobs: &JobSet, events: Vec<Event>, kpi: RunKpi) -> Self {
        Self {
            job_count: jobs.len(),
            algorithm: params.algorithm,
            run_for: params.run_for,
            events,
            metrics: jobs.iter().map(JobMetrics::from_job).collect(),
            kpi,
        }
    }

    /// Renders as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} processes", self.job_count)?;
        writeln!(f, "Using {}", self.algorithm.policy().description())?;
        if let Some(quantum) = self.algorithm.quantum() {
            writeln!(f, "Quantum {quantum}")?;
        }
        writeln!(f)?;

        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        writeln!(f, "Finished at time {}", self.run_for)?;
        writeln!(f)?;

        for m in &self.metrics {
            match m.turnaround {
                Some(turnaround) => {
                    writeln!(f, "{} wait {} turnaround {}", m.name, m.wait, turnaround)?
                }
                None => writeln!(f, "{} wait {} turnaround ?", m.name, m.wait)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use crate::scheduler::Simulation;

    fn report(specs: &[(&str, u32, u32)], run_for: Tick, algorithm: Algorithm) -> SimulationReport {
        let jobs = JobSet::new(
            specs
                .iter()
                .map(|&(name, arrival, burst)| Job::new(name, arrival, burst)),
        );
        Simulation::new(jobs, RunParameters::new(run_for, algorithm)).run()
    }

    #[test]
    fn test_fcfs_text() {
        let text = report(&[("A", 0, 5), ("B", 1, 3)], 8, Algorithm::Fcfs).to_string();
        assert_eq!(
            text,
            "2 processes\n\
             Using First-Come First-Served\n\
             \n\
             Time 0: A arrived\n\
             Time 0: A selected (burst 5)\n\
             Time 1: B arrived\n\
             Time 5: A finished\n\
             Time 5: B selected (burst 3)\n\
             Time 8: B finished\n\
             Finished at time 8\n\
             \n\
             A wait 0 turnaround 5\n\
             B wait 4 turnaround 7\n"
        );
    }

    #[test]
    fn test_round_robin_header_and_unfinished() {
        let text = report(&[("P1", 0, 9)], 2, Algorithm::round_robin(3)).to_string();
        assert_eq!(
            text,
            "1 processes\n\
             Using Round-Robin\n\
             Quantum 3\n\
             \n\
             Time 0: P1 arrived\n\
             Time 0: P1 selected (burst 9)\n\
             Finished at time 2\n\
             \n\
             P1 wait 0 turnaround ?\n"
        );
    }

    #[test]
    fn test_sjf_header() {
        let text = report(&[], 1, Algorithm::Sjf).to_string();
        assert!(text.starts_with("0 processes\nUsing preemptive Shortest Job First\n\n"));
        assert!(text.contains("Time 0: IDLE\n"));
        assert!(text.ends_with("Finished at time 1\n\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let original = report(&[("A", 0, 2), ("B", 1, 1)], 4, Algorithm::round_robin(1));
        let json = original.to_json().unwrap();
        let parsed: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
